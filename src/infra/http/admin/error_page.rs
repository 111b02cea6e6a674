use axum::{extract::Query, response::Response};
use serde::Deserialize;

use crate::application::error::ErrorKind;
use crate::presentation::views::{ErrorPageView, ErrorTemplate, render_template_response};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ErrorPageQuery {
    kind: Option<String>,
    title: Option<String>,
    message: Option<String>,
}

/// Render the structured error carried by an admin redirect. Reachable
/// without credentials.
pub(super) async fn error_page(Query(query): Query<ErrorPageQuery>) -> Response {
    let kind = ErrorKind::parse_lenient(query.kind.as_deref());
    let view = ErrorPageView::new(kind, query.title, query.message);
    render_template_response(ErrorTemplate { view }, kind.status())
}
