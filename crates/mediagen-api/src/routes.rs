mod media;

use crate::schemas::ServiceInfo;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(service_info))
        .route("/media/generate-image", post(media::generate_image))
        .route("/media/generate-3d", post(media::generate_threed))
        .route("/media/{id}", get(media::get_media))
}

async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "online",
        service: "mediagen",
        version: env!("CARGO_PKG_VERSION"),
        api_token_configured: state.token_configured,
    })
}
