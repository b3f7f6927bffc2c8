//! Media kinds and their per-kind defaults

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of media being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    ThreeD,
    Music,
}

impl MediaKind {
    /// Wire name used in response envelopes
    pub fn media_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::ThreeD => "3d_model",
            MediaKind::Music => "music",
        }
    }

    /// Short prefix for generated media IDs
    pub fn id_prefix(&self) -> &'static str {
        match self {
            MediaKind::Image => "img",
            MediaKind::Video => "vid",
            MediaKind::ThreeD => "3d",
            MediaKind::Music => "mus",
        }
    }

    /// Subdirectory under the output root for downloaded artifacts
    pub fn output_subdir(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
            MediaKind::ThreeD => "3d_models",
            MediaKind::Music => "music",
        }
    }

    /// File type assumed when a URL has no recognized suffix
    pub fn default_file_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
            MediaKind::ThreeD => "glb",
            MediaKind::Music => "mp3",
        }
    }

    /// File suffixes accepted as this kind's artifact type
    pub fn known_file_types(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => &["png", "jpg", "jpeg", "webp", "gif"],
            MediaKind::Video => &["mp4", "webm", "mov"],
            MediaKind::ThreeD => &["glb", "obj", "fbx", "usdz", "stl"],
            MediaKind::Music => &["mp3", "wav", "ogg", "flac"],
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::ThreeD => write!(f, "3d"),
            MediaKind::Music => write!(f, "music"),
        }
    }
}
