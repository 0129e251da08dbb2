use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, header::InvalidHeaderValue},
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::info;

use crate::{
    api,
    config::Config,
    error::{Error, Result},
    spotify::SpotifyClient,
};

/// Builds the application router around an existing client.
pub fn router(client: SpotifyClient) -> Result<Router> {
    let cors = cors_layer(&client.config().frontend_url).map_err(|e| {
        Error::Configuration(format!(
            "FRONTEND_URL is not a valid origin ({}): {}",
            client.config().frontend_url,
            e
        ))
    })?;

    Ok(Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/me", get(api::me))
        .route("/me/top", get(api::top_items))
        .layer(cors)
        .with_state(client))
}

/// Only the frontend origin may call us, with credentials.
fn cors_layer(frontend_url: &str) -> std::result::Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(frontend_url)?)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Binds `config.server_address` and serves until the process is stopped.
pub async fn start_api_server(config: Config) -> Result<()> {
    let addr = SocketAddr::from_str(&config.server_address).map_err(|e| {
        Error::Configuration(format!(
            "Failed to parse server address {}: {}",
            config.server_address, e
        ))
    })?;

    let app = router(SpotifyClient::new(Arc::new(config)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
