//! Video model variants and payload shaping
//!
//! WAN variants share a block of sampling defaults and differ in target
//! area and sample shift; the i2v variants require a source image. Veo2
//! takes a plain prompt/duration payload.

use super::{unknown_model, BuiltRequest};
use crate::error::{MediagenError, Result};
use crate::kind::MediaKind;
use serde_json::{json, Value};
use std::fmt;

pub const MODEL_NAMES: &[&str] = &[
    "wan-i2v-720p",
    "wan-i2v-480p",
    "wan-t2v-720p",
    "wan-t2v-480p",
    "veo2",
];

/// A named video model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoModel {
    WanI2v720p,
    WanI2v480p,
    WanT2v720p,
    WanT2v480p,
    Veo2,
}

impl VideoModel {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "wan-i2v-720p" => Ok(VideoModel::WanI2v720p),
            "wan-i2v-480p" => Ok(VideoModel::WanI2v480p),
            "wan-t2v-720p" => Ok(VideoModel::WanT2v720p),
            "wan-t2v-480p" => Ok(VideoModel::WanT2v480p),
            "veo2" => Ok(VideoModel::Veo2),
            other => Err(unknown_model(MediaKind::Video, other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VideoModel::WanI2v720p => "wan-i2v-720p",
            VideoModel::WanI2v480p => "wan-i2v-480p",
            VideoModel::WanT2v720p => "wan-t2v-720p",
            VideoModel::WanT2v480p => "wan-t2v-480p",
            VideoModel::Veo2 => "veo2",
        }
    }

    pub fn remote_path(&self) -> &'static str {
        match self {
            VideoModel::WanI2v720p => "wavespeedai/wan-2.1-i2v-720p",
            VideoModel::WanI2v480p => "wavespeedai/wan-2.1-i2v-480p",
            VideoModel::WanT2v720p => "wavespeedai/wan-2.1-t2v-720p",
            VideoModel::WanT2v480p => "wavespeedai/wan-2.1-t2v-480p",
            VideoModel::Veo2 => "google/veo-2",
        }
    }

    /// Image-to-video variants cannot run without a source image
    pub fn requires_image(&self) -> bool {
        matches!(self, VideoModel::WanI2v720p | VideoModel::WanI2v480p)
    }
}

impl fmt::Display for VideoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options for video generation
#[derive(Debug, Clone)]
pub struct VideoOptions {
    pub prompt: String,
    pub image_url: Option<String>,
    pub seed: Option<i64>,
    pub aspect_ratio: String,
    /// Veo2 clip length in seconds
    pub duration: u32,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            image_url: None,
            seed: None,
            aspect_ratio: "16:9".to_string(),
            duration: 5,
        }
    }
}

/// Sampling defaults shared by the WAN family
fn wan_defaults(input: &mut Value) {
    input["fast_mode"] = json!("Balanced");
    input["num_frames"] = json!(81); // model minimum
    input["sample_steps"] = json!(30);
    input["frames_per_second"] = json!(16);
    input["sample_guide_scale"] = json!(5.0);
}

/// Build the remote request for a video model
pub fn build_request(model: VideoModel, options: &VideoOptions) -> Result<BuiltRequest> {
    if model.requires_image() && options.image_url.is_none() {
        return Err(MediagenError::Validation(format!(
            "Model '{}' requires a source image",
            model.name()
        )));
    }

    let mut input = match model {
        VideoModel::WanI2v720p => {
            let mut input = json!({
                "image": options.image_url,
                "prompt": options.prompt,
                "max_area": "720x1280",
                "sample_shift": 5,
            });
            wan_defaults(&mut input);
            input
        }
        VideoModel::WanI2v480p => {
            let mut input = json!({
                "image": options.image_url,
                "prompt": options.prompt,
                "max_area": "832x480",
                "sample_shift": 3,
            });
            wan_defaults(&mut input);
            input
        }
        VideoModel::WanT2v720p | VideoModel::WanT2v480p => {
            let mut input = json!({
                "prompt": options.prompt,
                "aspect_ratio": options.aspect_ratio,
                "sample_shift": 5,
            });
            wan_defaults(&mut input);
            input
        }
        VideoModel::Veo2 => json!({
            "prompt": options.prompt,
            "duration": options.duration,
            "aspect_ratio": options.aspect_ratio,
        }),
    };

    // Seed is only meaningful for the reproducible variants
    if matches!(model, VideoModel::WanI2v480p | VideoModel::Veo2) {
        if let Some(seed) = options.seed {
            input["seed"] = json!(seed);
        }
    }

    Ok(BuiltRequest {
        model_path: model.remote_path().to_string(),
        version: None,
        input,
    })
}
