use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    error::{Error, Result},
    spotify::SpotifyClient,
    types::{TopItems, TopItemsParams, User},
};

fn bearer(params: &HashMap<String, String>) -> Result<&str> {
    params
        .get("token")
        .map(String::as_str)
        .filter(|token| !token.is_empty())
        .ok_or(Error::MissingToken)
}

pub async fn me(
    State(client): State<SpotifyClient>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<User>> {
    let token = bearer(&params)?;
    Ok(Json(client.fetch_profile(token).await?))
}

pub async fn top_items(
    State(client): State<SpotifyClient>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TopItems>> {
    let token = bearer(&params)?;
    // Validated before anything goes out.
    let top_params = TopItemsParams::from_query(&params)?;

    Ok(Json(client.fetch_all_top_items(token, &top_params).await?))
}
