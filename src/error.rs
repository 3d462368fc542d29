//! Common error types for the data gateway

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Upstream {url} unreachable: {source}")]
    UpstreamUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream {url} returned {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("No repositories on page {0}")]
    EmptyPage(u32),
}

impl AppError {
    /// Build a configuration error from a message
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(config::ConfigError::Message(message.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Callers only ever see fixed messages; details stay in the logs.
        let (status, message) = match &self {
            AppError::UpstreamUnreachable { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to fetch data from service",
            ),
            AppError::BodyRead { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to read body")
            }
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::HttpClient(_)
            | AppError::UpstreamStatus { .. }
            | AppError::EmptyPage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        plain_text_error(status, message)
    }
}

/// Plain-text error reply: the message plus a trailing newline, never sniffed.
pub fn plain_text_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        format!("{message}\n"),
    )
        .into_response()
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
