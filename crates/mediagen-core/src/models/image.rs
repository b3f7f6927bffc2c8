//! Image model variants and payload shaping
//!
//! Flux models take an aspect-ratio string directly; Recraft requires raw
//! pixel dimensions, so the ratio is mapped to width/height; imagen-3-fast
//! trades steps for speed on the shared imagen-3 endpoint.

use super::{unknown_model, BuiltRequest};
use crate::error::Result;
use crate::kind::MediaKind;
use serde_json::json;
use std::fmt;

pub const MODEL_NAMES: &[&str] = &[
    "flux-schnell",
    "flux-pro",
    "flux-pro-ultra",
    "flux-dev",
    "recraft",
    "imagen-3",
    "imagen-3-fast",
];

/// A named image model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageModel {
    FluxSchnell,
    FluxPro,
    FluxProUltra,
    FluxDev,
    Recraft,
    Imagen3,
    Imagen3Fast,
}

impl ImageModel {
    /// Parse a user-facing model name. Unknown names are a hard
    /// validation error at every entry point.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "flux-schnell" => Ok(ImageModel::FluxSchnell),
            "flux-pro" => Ok(ImageModel::FluxPro),
            "flux-pro-ultra" => Ok(ImageModel::FluxProUltra),
            "flux-dev" => Ok(ImageModel::FluxDev),
            "recraft" => Ok(ImageModel::Recraft),
            "imagen-3" => Ok(ImageModel::Imagen3),
            "imagen-3-fast" => Ok(ImageModel::Imagen3Fast),
            other => Err(unknown_model(MediaKind::Image, other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageModel::FluxSchnell => "flux-schnell",
            ImageModel::FluxPro => "flux-pro",
            ImageModel::FluxProUltra => "flux-pro-ultra",
            ImageModel::FluxDev => "flux-dev",
            ImageModel::Recraft => "recraft",
            ImageModel::Imagen3 => "imagen-3",
            ImageModel::Imagen3Fast => "imagen-3-fast",
        }
    }

    /// Target remote model identifier
    pub fn remote_path(&self) -> &'static str {
        match self {
            ImageModel::FluxSchnell => "black-forest-labs/flux-schnell",
            ImageModel::FluxPro => "black-forest-labs/flux-1.1-pro",
            ImageModel::FluxProUltra => "black-forest-labs/flux-1.1-pro-ultra",
            ImageModel::FluxDev => "black-forest-labs/flux-dev",
            ImageModel::Recraft => "recraft-ai/recraft-v3",
            ImageModel::Imagen3 | ImageModel::Imagen3Fast => "google/imagen-3",
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options for image generation
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub aspect_ratio: String,
    pub output_format: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: None,
            aspect_ratio: "3:2".to_string(),
            output_format: "jpg".to_string(),
        }
    }
}

/// Recraft takes explicit dimensions instead of a ratio string
fn recraft_dimensions(aspect_ratio: &str) -> (u32, u32) {
    if aspect_ratio.contains("16:9") {
        (1024, 576)
    } else if aspect_ratio.contains("1:1") {
        (1024, 1024)
    } else {
        (1024, 683)
    }
}

/// Build the remote request for an image model
pub fn build_request(model: ImageModel, options: &ImageOptions) -> Result<BuiltRequest> {
    let mut input = json!({
        "prompt": options.prompt,
        "aspect_ratio": options.aspect_ratio,
        "output_format": options.output_format,
    });

    if let Some(neg) = &options.negative_prompt {
        input["negative_prompt"] = json!(neg);
    }

    match model {
        ImageModel::Recraft => {
            let (width, height) = recraft_dimensions(&options.aspect_ratio);
            input["width"] = json!(width);
            input["height"] = json!(height);
        }
        ImageModel::Imagen3Fast => {
            input["scale"] = json!(7.5);
            input["steps"] = json!(30);
        }
        _ => {}
    }

    Ok(BuiltRequest {
        model_path: model.remote_path().to_string(),
        version: None,
        input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for name in MODEL_NAMES {
            let model = ImageModel::from_name(name).unwrap();
            assert_eq!(model.name(), *name);
        }
    }

    #[test]
    fn test_unknown_name_is_error() {
        assert!(ImageModel::from_name("unsupported-model").is_err());
        assert!(ImageModel::from_name("").is_err());
    }

    #[test]
    fn test_flux_schnell_payload() {
        let options = ImageOptions {
            prompt: "test".to_string(),
            aspect_ratio: "16:9".to_string(),
            ..Default::default()
        };
        let req = build_request(ImageModel::FluxSchnell, &options).unwrap();
        assert_eq!(req.model_path, "black-forest-labs/flux-schnell");
        assert!(req.version.is_none());
        assert_eq!(req.input["prompt"], "test");
        assert_eq!(req.input["aspect_ratio"], "16:9");
        assert_eq!(req.input["output_format"], "jpg");
        assert!(req.input.get("negative_prompt").is_none());
    }

    #[test]
    fn test_negative_prompt_only_when_set() {
        let options = ImageOptions {
            prompt: "castle".to_string(),
            negative_prompt: Some("blurry".to_string()),
            ..Default::default()
        };
        let req = build_request(ImageModel::FluxDev, &options).unwrap();
        assert_eq!(req.input["negative_prompt"], "blurry");
    }

    #[test]
    fn test_recraft_dimension_mapping() {
        for (ratio, width, height) in [
            ("16:9", 1024, 576),
            ("1:1", 1024, 1024),
            ("3:2", 1024, 683),
            ("4:3", 1024, 683), // unrecognized ratios fall back to 3:2 dims
        ] {
            let options = ImageOptions {
                prompt: "p".to_string(),
                aspect_ratio: ratio.to_string(),
                ..Default::default()
            };
            let req = build_request(ImageModel::Recraft, &options).unwrap();
            assert_eq!(req.input["width"], width, "ratio {}", ratio);
            assert_eq!(req.input["height"], height, "ratio {}", ratio);
        }
    }

    #[test]
    fn test_imagen_fast_adds_scale_and_steps() {
        let options = ImageOptions {
            prompt: "p".to_string(),
            ..Default::default()
        };
        let req = build_request(ImageModel::Imagen3Fast, &options).unwrap();
        assert_eq!(req.model_path, "google/imagen-3");
        assert_eq!(req.input["scale"], 7.5);
        assert_eq!(req.input["steps"], 30);

        let plain = build_request(ImageModel::Imagen3, &options).unwrap();
        assert!(plain.input.get("scale").is_none());
        assert!(plain.input.get("steps").is_none());
    }
}
