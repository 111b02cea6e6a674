use std::error::Error as StdError;

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infra::error::InfraError;

pub const ERROR_PAGE_PATH: &str = "/error";

#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            report,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

/// Category of a failure shown on the error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    UnknownServerError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::UnknownServerError => "unknown-server-error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::UnknownServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Unrecognised kinds render as server errors.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("bad-request") => ErrorKind::BadRequest,
            Some("unauthorized") => ErrorKind::Unauthorized,
            _ => ErrorKind::UnknownServerError,
        }
    }
}

/// Structured failure handed to the error page through a `303 See Other`.
///
/// The redirect carries an [`ErrorReport`] extension so response logging can
/// record where the failure originated.
#[derive(Debug)]
pub struct ErrorPage {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
    report: ErrorReport,
}

impl ErrorPage {
    pub fn new(
        source: &'static str,
        kind: ErrorKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let message = message.into();
        let report = ErrorReport::from_message(source, kind.status(), format!("{title}: {message}"));
        Self {
            kind,
            title,
            message,
            report,
        }
    }

    /// Replace the logged diagnostic with the chain of `error`.
    pub fn with_cause(mut self, error: &dyn StdError) -> Self {
        self.report = ErrorReport::from_error(self.report.source, self.kind.status(), error);
        self
    }

    pub fn location(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("kind", self.kind.as_str())
            .append_pair("title", &self.title)
            .append_pair("message", &self.message)
            .finish();
        format!("{ERROR_PAGE_PATH}?{query}")
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let location = self.location();
        let mut response = (StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response();
        self.report.attach(&mut response);
        response
    }
}

/// Failure surfaced by the binary's entry points.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
