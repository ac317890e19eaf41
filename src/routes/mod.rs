use crate::config::Config;
use crate::room_store::actor_client::RoomStoreClient;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

mod connection;
mod health;
mod metrics;

pub fn create_router(config: &Config) -> Router<Arc<RoomStoreClient>> {
    Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/ws", get(connection::connect_to_websocket))
        .layer(if config.allow_cors {
            log::info!("CorsLayer Permissive");
            CorsLayer::permissive()
        } else {
            CorsLayer::default()
        })
}
