use crate::error::{ApiError, NotFound};
use crate::schemas::{
    GenerateImageRequest, GenerateThreeDRequest, MediaResponse, HTTP_IMAGE_MODELS,
};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use mediagen_core::{ImageOptions, MediagenError, ThreeDOptions};
use std::sync::Arc;

/// Restrict the HTTP surface to its own model subset; the library accepts
/// more names than the service exposes
fn check_http_image_model(model: &str) -> Result<(), MediagenError> {
    if HTTP_IMAGE_MODELS.contains(&model) {
        Ok(())
    } else {
        Err(MediagenError::Validation(format!(
            "Unknown image model '{}'. Available: {}",
            model,
            HTTP_IMAGE_MODELS.join(", ")
        )))
    }
}

/// A pipeline that completes without an artifact URL is a failure, not a
/// success to report to the client
fn require_url(result: mediagen_core::MediaResult) -> Result<mediagen_core::MediaResult, ApiError> {
    if result.url.is_none() {
        return Err(ApiError::internal(format!(
            "no artifact URL could be extracted from {} output",
            result.model
        )));
    }
    Ok(result)
}

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateImageRequest>,
) -> Result<Json<MediaResponse>, ApiError> {
    check_http_image_model(&req.model)?;

    tracing::info!(model = %req.model, "image generation requested");

    let worker = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        let options = ImageOptions {
            prompt: req.prompt,
            negative_prompt: req.negative_prompt,
            aspect_ratio: req.aspect_ratio,
            ..Default::default()
        };
        worker.generator.generate_image(&req.model, &options)
    })
    .await
    .map_err(|e| ApiError::internal(format!("generation task failed: {}", e)))??;

    let result = require_url(result)?;
    state.store.insert(result.clone());
    Ok(Json(MediaResponse::from_result(&result)))
}

pub async fn generate_threed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateThreeDRequest>,
) -> Result<Json<MediaResponse>, ApiError> {
    tracing::info!(model = %req.model, "3d generation requested");

    let worker = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut options = ThreeDOptions {
            image_url: req.image_url,
            remove_background: req.remove_background,
            ..Default::default()
        };
        if let Some(seed) = req.seed {
            options.seed = seed;
        }
        worker.generator.generate_threed(&req.model, &options)
    })
    .await
    .map_err(|e| ApiError::internal(format!("generation task failed: {}", e)))??;

    let result = require_url(result)?;
    state.store.insert(result.clone());
    Ok(Json(MediaResponse::from_result(&result)))
}

pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MediaResponse>, NotFound> {
    match state.store.get(&id) {
        Some(result) => Ok(Json(MediaResponse::from_result(&result))),
        None => Err(NotFound(id)),
    }
}
