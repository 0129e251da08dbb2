//! # API Module
//!
//! HTTP endpoints exposed to the frontend. Every handler is a thin adapter:
//! it pulls its inputs out of the query string, calls into
//! [`SpotifyClient`](crate::spotify::SpotifyClient) and turns the outcome into
//! a response.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /login`, redirects to Spotify's authorization page.
//! - [`callback`] - `GET /callback?code=..`, exchanges the code and redirects
//!   to the frontend with `?access_token=..`.
//!
//! ### Current user
//!
//! - [`me`] - `GET /me?token=..`, the user's profile.
//! - [`top_items`] - `GET /me/top?token=..&limit=..&time_range=..&offset=..`,
//!   top artists and top tracks in one payload.
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, status and version.
//!
//! ## Errors
//!
//! Failures are rendered as `{"detail": "<message>"}` with the status picked
//! by [`status_for`]: client input problems are 4xx, anything that went wrong
//! talking to Spotify is 5xx.

mod auth;
mod health;
mod user;

pub use auth::{callback, login};
pub use health::health;
pub use user::{me, top_items};

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::Error;

/// HTTP status a failed request is answered with.
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::MissingAuthorizationCode | Error::MissingToken => StatusCode::BAD_REQUEST,
        Error::InvalidParams(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        Error::Configuration(_)
        | Error::TokenExchange { .. }
        | Error::UpstreamRequest { .. }
        | Error::SchemaValidation(_)
        | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// `302 Found` to `location`.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
