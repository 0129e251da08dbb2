//! Error types shared by every part of the proxy.
//!
//! Each variant maps onto exactly one failure class. Request handlers never
//! recover from these; the whole request is aborted with the matching status
//! (see `api`).

use reqwest::StatusCode;
use thiserror::Error;

use crate::schema::SchemaValidationError;

/// Main error type for configuration, token exchange and resource operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or invalid. Only raised at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The OAuth callback was hit without a `code` query parameter.
    #[error("Missing authorization code")]
    MissingAuthorizationCode,

    /// A resource route was hit without a `token` query parameter.
    #[error("Access token required")]
    MissingToken,

    /// Caller supplied top-items query parameters outside their allowed range.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The token endpoint rejected the exchange or returned no access token.
    #[error("Token exchange failed ({status}): {body}")]
    TokenExchange { status: StatusCode, body: String },

    /// The resource API answered with a non-success status.
    #[error("Upstream request failed ({status}): {body}")]
    UpstreamRequest { status: StatusCode, body: String },

    /// The upstream host could not be reached at all.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    /// An upstream response did not match the expected shape.
    #[error(transparent)]
    SchemaValidation(#[from] SchemaValidationError),

    /// The local listener could not be bound or failed while serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::UpstreamUnavailable(err)
    }
}

/// Result type alias for proxy operations.
pub type Result<T> = std::result::Result<T, Error>;
