use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    schema,
    types::TokenResponse,
    utils,
};

use super::{SpotifyClient, error_body};

/// Permissions requested from the user.
pub const SCOPE: &str = "user-top-read";

impl SpotifyClient {
    /// Builds the Spotify authorization URL the user is redirected to.
    ///
    /// No network call is made. `client_id`, `redirect_uri` and the scope are
    /// percent-encoded, so a redirect URI of `https://app.example/cb` becomes
    /// `https%3A%2F%2Fapp.example%2Fcb`.
    ///
    /// # Example
    ///
    /// ```
    /// let url = client.authorize_url();
    /// // https://accounts.spotify.com/authorize?client_id=abc&response_type=code&...
    /// ```
    pub fn authorize_url(&self) -> String {
        let config = self.config();
        format!(
            "{accounts}/authorize?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
            accounts = config.accounts_base_url,
            client_id = utils::encode_query_value(&config.client_id),
            redirect_uri = utils::encode_query_value(&config.redirect_uri),
            scope = utils::encode_query_value(SCOPE),
        )
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Completes the authorization-code grant started by [`authorize_url`].
    /// The code is whatever arrived in the callback's `code` query parameter;
    /// `None` (or an empty string) fails before anything is sent.
    ///
    /// # Request
    ///
    /// `POST {accounts}/api/token` with the form body
    /// `grant_type=authorization_code&code=..&redirect_uri=..` and the client
    /// credentials in a Basic `Authorization` header.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingAuthorizationCode`] - no code was supplied.
    /// - [`Error::UpstreamUnavailable`] - the token endpoint could not be reached.
    /// - [`Error::TokenExchange`] - non-success status, or a success status
    ///   whose body carries no `access_token` (Spotify reports some failures
    ///   with a 200 and an error payload).
    /// - [`Error::SchemaValidation`] - the token body is otherwise malformed.
    ///
    /// [`authorize_url`]: SpotifyClient::authorize_url
    pub async fn exchange_code(&self, code: Option<&str>) -> Result<TokenResponse> {
        let code = code
            .filter(|code| !code.is_empty())
            .ok_or(Error::MissingAuthorizationCode)?;

        let config = self.config();
        let url = format!("{}/api/token", config.accounts_base_url);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(
                AUTHORIZATION,
                utils::basic_credentials(&config.client_id, &config.client_secret),
            )
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("POST {} -> {}", url, status);

        if !status.is_success() {
            let body = error_body(response).await;
            warn!("Token exchange rejected with {}", status);
            return Err(Error::TokenExchange { status, body });
        }

        let bytes = response.bytes().await?;
        let json: Value = schema::parse_slice(&bytes)?;

        let has_token = json
            .get("access_token")
            .and_then(Value::as_str)
            .is_some_and(|token| !token.is_empty());
        if !has_token {
            warn!("Token endpoint answered {} without an access token", status);
            return Err(Error::TokenExchange {
                status,
                body: "no access token returned".to_string(),
            });
        }

        Ok(schema::parse(json)?)
    }

    /// Where the browser goes once a token has been obtained.
    ///
    /// The token is handed to the frontend as a query parameter and is not
    /// kept anywhere on this side.
    pub fn frontend_redirect_url(&self, access_token: &str) -> String {
        format!(
            "{}/?access_token={}",
            self.config().frontend_url,
            utils::encode_query_value(access_token)
        )
    }
}
