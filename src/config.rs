//! Configuration management for the statify proxy.
//!
//! All settings are read once at startup into a [`Config`] value, which is then
//! handed to the server and the Spotify client. Request handling code never
//! reads the process environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory

use std::{env, fmt, path::PathBuf};

use crate::error::{Error, Result};

pub const CLIENT_ID: &str = "CLIENT_ID";
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const REDIRECT_URI: &str = "REDIRECT_URI";
pub const ACCOUNTS_BASE_URL: &str = "SPOTIFY_ACCOUNTS_BASE_URL";
pub const API_BASE_URL: &str = "SPOTIFY_API_BASE_URL";
pub const FRONTEND_URL: &str = "FRONTEND_URL";
pub const SERVER_ADDRESS: &str = "SERVER_ADDRESS";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";

/// Loads environment variables from `.env` files.
///
/// Variables already present in the process environment are never
/// overwritten, so the working-directory file wins over the one in the local
/// data directory, and both lose against the real environment.
///
/// # Directory Structure
///
/// The shared `.env` file is looked up in:
/// - Linux: `~/.local/share/statify/.env`
/// - macOS: `~/Library/Application Support/statify/.env`
/// - Windows: `%LOCALAPPDATA%/statify/.env`
///
/// Missing files are not an error; missing variables are reported later by
/// [`Config::from_env`].
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or a `.env` file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<()> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(Error::Configuration(format!("Invalid .env file: {}", e)));
        }
    }

    let path = data_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await.map_err(|e| {
            Error::Configuration(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    match dotenv::from_path(&path) {
        Err(e) if !e.not_found() => Err(Error::Configuration(format!(
            "Invalid env file {}: {}",
            path.display(),
            e
        ))),
        _ => Ok(()),
    }
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("statify/.env");
    path
}

/// Settings for one running instance of the proxy.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Client ID obtained when registering the application with Spotify.
    pub client_id: String,
    /// Client secret for the same registration. Only ever sent in the
    /// `Authorization` header of the token request.
    pub client_secret: String,
    /// Callback URL registered with Spotify, e.g. `http://localhost:8000/callback`.
    pub redirect_uri: String,
    /// e.g. `https://accounts.spotify.com`
    pub accounts_base_url: String,
    /// e.g. `https://api.spotify.com/v1`
    pub api_base_url: String,
    /// Origin of the frontend; allowed by CORS and target of the final redirect.
    pub frontend_url: String,
    /// Address the HTTP server binds to.
    pub server_address: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first to pick up `.env` files.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Every variable except `SERVER_ADDRESS` is required and must be
    /// non-empty. Trailing slashes on URLs are dropped so paths can be
    /// appended with `format!("{}/path", base)`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::Configuration(format!("{} must be set", key)))
        };
        let url = |key: &str| -> Result<String> {
            required(key).map(|value| value.trim_end_matches('/').to_string())
        };

        Ok(Self {
            client_id: required(CLIENT_ID)?,
            client_secret: required(CLIENT_SECRET)?,
            redirect_uri: required(REDIRECT_URI)?,
            accounts_base_url: url(ACCOUNTS_BASE_URL)?,
            api_base_url: url(API_BASE_URL)?,
            frontend_url: url(FRONTEND_URL)?,
            server_address: lookup(SERVER_ADDRESS)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("accounts_base_url", &self.accounts_base_url)
            .field("api_base_url", &self.api_base_url)
            .field("frontend_url", &self.frontend_url)
            .field("server_address", &self.server_address)
            .finish()
    }
}
