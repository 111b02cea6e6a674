//! Blog slug derivation.
//!
//! Titles are folded to ASCII by the `slug` crate. Uniqueness is delegated to
//! a caller-supplied async predicate so the derivation stays independent of
//! storage.

use std::future::Future;

use slug::slugify;
use thiserror::Error;

const MAX_SUFFIX_ATTEMPTS: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
    #[error("exhausted attempts to find a unique slug for `{base}`")]
    Exhausted { base: String },
}

/// Failure of [`unique_slug`]: either the title itself or the uniqueness lookup.
#[derive(Debug, Error)]
pub enum UniqueSlugError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Lookup(E),
}

/// Derive the base slug for a title.
pub fn derive_slug(title: &str) -> Result<String, SlugError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(trimmed);
    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: title.to_string(),
        });
    }

    Ok(candidate)
}

/// Derive a slug that `is_unused` accepts, suffixing `-2`, `-3`, … on collision.
pub async fn unique_slug<F, Fut, E>(
    title: &str,
    mut is_unused: F,
) -> Result<String, UniqueSlugError<E>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let base = derive_slug(title)?;

    let candidates = std::iter::once(base.clone())
        .chain((2..=MAX_SUFFIX_ATTEMPTS + 1).map(|suffix| format!("{base}-{suffix}")));

    for candidate in candidates {
        if is_unused(candidate.clone())
            .await
            .map_err(UniqueSlugError::Lookup)?
        {
            return Ok(candidate);
        }
    }

    Err(UniqueSlugError::Slug(SlugError::Exhausted { base }))
}
