//! HTTP JSON API for the dashboard and directory map views.

mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::error::Result;

pub use state::AppState;

pub fn build_router(config: Config) -> Router {
    let state = Arc::new(AppState::new(config));

    Router::new()
        .route("/api/parse", get(handlers::parse_one).post(handlers::parse_batch))
        .route("/api/cluster", post(handlers::cluster))
        .route("/api/map", post(handlers::network_map))
        .route("/api/hubs", get(handlers::hub_list))
        .route("/api/catalog/{kind}", get(handlers::catalog))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("web3-atlas API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
