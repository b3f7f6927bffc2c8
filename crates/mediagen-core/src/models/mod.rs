//! Model request builders
//!
//! Maps each user-facing model variant to its remote identifier, optional
//! version pin, and the payload shape that model family expects.

pub mod image;
pub mod music;
pub mod threed;
pub mod video;

use crate::error::{MediagenError, Result};
use crate::kind::MediaKind;
use serde_json::Value;

pub use image::{ImageModel, ImageOptions};
pub use music::MusicOptions;
pub use threed::{ThreeDModel, ThreeDOptions};
pub use video::{VideoModel, VideoOptions};

/// A fully-shaped remote invocation request
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    /// Remote model identifier, e.g. `black-forest-labs/flux-schnell`
    pub model_path: String,
    /// Fixed version pin for reproducibility across upstream revisions
    pub version: Option<String>,
    /// JSON input payload
    pub input: Value,
}

/// List the accepted model names for a kind
pub fn model_names(kind: MediaKind) -> &'static [&'static str] {
    match kind {
        MediaKind::Image => image::MODEL_NAMES,
        MediaKind::Video => video::MODEL_NAMES,
        MediaKind::ThreeD => threed::MODEL_NAMES,
        MediaKind::Music => music::MODEL_NAMES,
    }
}

pub(crate) fn unknown_model(kind: MediaKind, name: &str) -> MediagenError {
    MediagenError::Validation(format!(
        "Unknown {} model '{}'. Available: {}",
        kind,
        name,
        model_names(kind).join(", ")
    ))
}

/// Validate that a string looks like an http(s) URL
pub fn validate_http_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(MediagenError::Validation(format!(
            "Invalid image URL '{}'. Must start with http:// or https://",
            url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_names_nonempty_per_kind() {
        for kind in [
            MediaKind::Image,
            MediaKind::Video,
            MediaKind::ThreeD,
            MediaKind::Music,
        ] {
            assert!(!model_names(kind).is_empty());
        }
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://example.com/a.png").is_ok());
        assert!(validate_http_url("http://example.com/a.png").is_ok());
        assert!(validate_http_url("not-a-url").is_err());
        assert!(validate_http_url("ftp://example.com/a.png").is_err());
    }

    #[test]
    fn test_unknown_model_message_lists_options() {
        let err = unknown_model(MediaKind::Image, "bogus");
        let msg = err.to_string();
        assert!(msg.contains("bogus"));
        assert!(msg.contains("flux-schnell"));
    }
}
