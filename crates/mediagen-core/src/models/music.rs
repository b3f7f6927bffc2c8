//! Music generation payload shaping
//!
//! Single remote family (MusicGen), version-pinned, with the full sampling
//! parameter set exposed as options.

use super::BuiltRequest;
use crate::error::Result;
use serde_json::json;

pub const MODEL_NAMES: &[&str] = &["musicgen"];

const MUSICGEN_PATH: &str = "meta/musicgen";
const MUSICGEN_VERSION: &str =
    "671ac645ce5e552cc63a54a2bbff63fcf798043055d2dac5fc9e36a837eedcfb";

/// Options for music generation
#[derive(Debug, Clone)]
pub struct MusicOptions {
    pub prompt: String,
    /// Clip length in seconds
    pub duration: u32,
    pub model_version: String,
    pub top_k: u32,
    pub top_p: f64,
    pub temperature: f64,
    pub continuation: bool,
    pub output_format: String,
    pub continuation_start: u32,
    pub multi_band_diffusion: bool,
    pub normalization_strategy: String,
    pub classifier_free_guidance: f64,
}

impl Default for MusicOptions {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            duration: 8,
            model_version: "stereo-large".to_string(),
            top_k: 250,
            top_p: 0.0,
            temperature: 1.0,
            continuation: false,
            output_format: "mp3".to_string(),
            continuation_start: 0,
            multi_band_diffusion: false,
            normalization_strategy: "peak".to_string(),
            classifier_free_guidance: 3.0,
        }
    }
}

/// Build the remote request for music generation
pub fn build_request(options: &MusicOptions) -> Result<BuiltRequest> {
    let input = json!({
        "prompt": options.prompt,
        "duration": options.duration,
        "model_version": options.model_version,
        "top_k": options.top_k,
        "top_p": options.top_p,
        "temperature": options.temperature,
        "continuation": options.continuation,
        "output_format": options.output_format,
        "continuation_start": options.continuation_start,
        "multi_band_diffusion": options.multi_band_diffusion,
        "normalization_strategy": options.normalization_strategy,
        "classifier_free_guidance": options.classifier_free_guidance,
    });

    Ok(BuiltRequest {
        model_path: MUSICGEN_PATH.to_string(),
        version: Some(MUSICGEN_VERSION.to_string()),
        input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_musicgen_payload_defaults() {
        let options = MusicOptions {
            prompt: "ambient pads".to_string(),
            ..Default::default()
        };
        let req = build_request(&options).unwrap();
        assert_eq!(req.model_path, "meta/musicgen");
        assert_eq!(req.version.as_deref(), Some(MUSICGEN_VERSION));
        assert_eq!(req.input["prompt"], "ambient pads");
        assert_eq!(req.input["duration"], 8);
        assert_eq!(req.input["model_version"], "stereo-large");
        assert_eq!(req.input["top_k"], 250);
        assert_eq!(req.input["output_format"], "mp3");
        assert_eq!(req.input["normalization_strategy"], "peak");
        assert_eq!(req.input["classifier_free_guidance"], 3.0);
    }
}
