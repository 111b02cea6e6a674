//! Authentication gate shared by every admin handler.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::application::{
    claims::{AdminGateError, ClaimsError, resolve_identity},
    error::{ErrorKind, ErrorPage},
};
use crate::domain::entities::AdminClaims;

use super::AdminState;

/// Cookie carrying the admin token when no `Authorization` header is sent.
pub const ADMIN_COOKIE: &str = "folio_admin";

const SOURCE: &str = "infra::http::admin_identity";

/// The authenticated administrator. Extracting it runs the gate; rejection is
/// a redirect to the error page.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub AdminClaims);

impl FromRequestParts<AdminState> for AdminIdentity {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AdminState,
    ) -> Result<Self, Self::Rejection> {
        let credential = credential_from_parts(parts);
        match resolve_identity(state.claims.as_ref(), credential.as_deref()).await {
            Ok(claims) => Ok(AdminIdentity(claims)),
            Err(err) => Err(gate_error_page(err).into_response()),
        }
    }
}

fn credential_from_parts(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(ADMIN_COOKIE)
            .map(|cookie| cookie.value().trim().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// Token of a `Bearer` authorization value. The scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then_some(token.trim())
}

pub(crate) fn gate_error_page(err: AdminGateError) -> ErrorPage {
    match err {
        AdminGateError::Authentication(claims_err) => {
            let (kind, title, message) = match &claims_err {
                ClaimsError::Missing => (
                    ErrorKind::Unauthorized,
                    "Unauthorized",
                    "An Admin Credential Is Required",
                ),
                ClaimsError::Invalid => (
                    ErrorKind::Unauthorized,
                    "Unauthorized",
                    "The Admin Credential Is Invalid",
                ),
                ClaimsError::Revoked => (
                    ErrorKind::Unauthorized,
                    "Unauthorized",
                    "The Admin Credential Has Been Revoked",
                ),
                ClaimsError::Unavailable { .. } => (
                    ErrorKind::UnknownServerError,
                    "Cannot Verify Credential",
                    "Cannot Verify The Admin Credential Due To Unknown Server Error",
                ),
            };
            ErrorPage::new(SOURCE, kind, title, message).with_cause(&claims_err)
        }
        AdminGateError::MissingIdentity => ErrorPage::new(
            SOURCE,
            ErrorKind::UnknownServerError,
            "Cannot Found User's Claim",
            "Cannot Find User's Claim Due To Unknown Server Error",
        ),
    }
}
