//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It covers two hosts:
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! SpotifyClient
//!     ├── Authentication (accounts host: /authorize, /api/token)
//!     └── Current user  (API host: /me, /me/top/{artists|tracks})
//!          ↓
//! reqwest
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization URL construction and the authorization-code
//!   exchange. The client secret travels in a Basic `Authorization` header,
//!   never in the form body.
//! - [`user`] - Profile and top items of the user owning the bearer token,
//!   including the concurrent artists + tracks aggregate.
//!
//! ## Error Handling
//!
//! Every call is attempted exactly once:
//! - Connection, DNS and timeout failures become
//!   [`Error::UpstreamUnavailable`](crate::error::Error::UpstreamUnavailable).
//! - Non-success statuses become `UpstreamRequest` (or `TokenExchange` for the
//!   token endpoint) with the status and a truncated body.
//! - Bodies that do not match the expected shape become `SchemaValidation`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = SpotifyClient::new(Arc::new(Config::from_env()?));
//! let token = client.exchange_code(Some(code)).await?;
//! let user = client.fetch_profile(&token.access_token).await?;
//! ```

pub mod auth;
pub mod user;

use std::sync::Arc;

use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
    schema, utils,
};

pub use auth::SCOPE;

/// Entry point for all outbound Spotify calls.
///
/// Cheap to clone: the configuration is shared and `reqwest::Client` is a
/// handle to a shared transport.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: Arc<Config>,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_http(Client::new(), config)
    }

    /// Uses a caller-provided transport, e.g. one with custom timeouts.
    pub fn with_http(http: Client, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Authenticated GET against the resource API, decoded into `T`.
    async fn get_json<T, Q>(&self, path: &str, token: &str, query: Option<&Q>) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!("GET {}", url);

        let mut request = self.http.get(&url).bearer_auth(token);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(Error::UpstreamRequest {
                status,
                body: error_body(response).await,
            });
        }

        let bytes = response.bytes().await?;
        Ok(schema::parse_slice(&bytes)?)
    }
}

/// Reads and truncates the body of a failed response.
async fn error_body(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    utils::truncate_body(&text, utils::MAX_ERROR_BODY_CHARS)
}
