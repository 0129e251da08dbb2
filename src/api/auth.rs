use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Response,
};
use tracing::info;

use crate::{error::Result, spotify::SpotifyClient};

use super::found;

pub async fn login(State(client): State<SpotifyClient>) -> Response {
    found(client.authorize_url())
}

pub async fn callback(
    State(client): State<SpotifyClient>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let token = client
        .exchange_code(params.get("code").map(String::as_str))
        .await?;

    info!("Authorization code exchanged, redirecting to frontend");
    Ok(found(client.frontend_redirect_url(&token.access_token)))
}
