mod support;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use support::{GOOD_TOKEN, MemoryStore, location, post_form, router, send};

#[tokio::test]
async fn blog_writes_emit_expected_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let store = Arc::new(MemoryStore::with_categories(&["a", "b", "c"]));
    let app = router(store.clone());

    let created = send(
        &app,
        post_form(
            "/admin/insert",
            Some(GOOD_TOKEN),
            "title=Counted&subtitle=&description=&attachment=&categories=a&categories=b",
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&created), "/admin/edit/counted");

    store.fail_removal_of("a");
    let updated = send(
        &app,
        post_form(
            "/admin/edit/counted",
            Some(GOOD_TOKEN),
            "title=Counted&subtitle=&description=&attachment=&cates=c",
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&updated), "/admin/index");
    assert_eq!(store.linked_slugs("counted"), vec!["a", "c"]);

    let counters: HashMap<String, u64> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(composite_key, _, _, value)| match value {
            DebugValue::Counter(count) => Some((composite_key.key().name().to_string(), count)),
            _ => None,
        })
        .collect();

    assert_eq!(counters.get("folio_blog_created_total"), Some(&1));
    assert_eq!(counters.get("folio_category_link_failures_total"), Some(&1));
}
