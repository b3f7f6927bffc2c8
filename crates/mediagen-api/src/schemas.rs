use chrono::{DateTime, Utc};
use mediagen_core::{MediaKind, MediaResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Image models exposed over HTTP. The service deliberately offers only
/// the fast tier; the slower premium variants stay CLI-only.
pub const HTTP_IMAGE_MODELS: &[&str] = &["flux-schnell", "imagen-3-fast"];

fn default_image_model() -> String {
    "flux-schnell".to_string()
}

fn default_threed_model() -> String {
    "hunyuan3d".to_string()
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateThreeDRequest {
    pub image_url: String,
    #[serde(default = "default_threed_model")]
    pub model: String,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default = "default_true")]
    pub remove_background: bool,
}

/// Response body shared by all generation endpoints and the lookup
/// endpoint. `url` always carries the artifact link; the kind-specific
/// aliases exist for clients that key on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: String,
    pub status: String,
    pub media_type: String,
    pub model: String,
    pub prompt: String,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub download_instructions: String,
    pub metadata: Value,
}

impl MediaResponse {
    pub fn from_result(result: &MediaResult) -> Self {
        let media_type = result.kind.media_type().to_string();
        let image_url = match result.kind {
            MediaKind::Image => result.url.clone(),
            _ => None,
        };
        let model_url = match result.kind {
            MediaKind::ThreeD => result.url.clone(),
            _ => None,
        };
        Self {
            id: result.id.clone(),
            status: "success".to_string(),
            media_type: media_type.clone(),
            model: result.model.clone(),
            prompt: result.prompt.clone(),
            url: result.url.clone(),
            image_url,
            model_url,
            file_type: result.file_type.clone(),
            created_at: result.created_at,
            description: format!("Generated {} using {}", media_type, result.model),
            download_instructions: format!(
                "Fetch the url field to save this {} as a .{} file. Artifact links expire, download promptly.",
                media_type, result.file_type
            ),
            metadata: result.metadata.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub api_token_configured: bool,
}
