pub mod batch;
pub mod generate;
pub mod models;

use anyhow::{bail, Result};
use mediagen_core::MediaKind;

/// Parse a user-facing kind name
pub fn parse_kind(name: &str) -> Result<MediaKind> {
    match name {
        "image" => Ok(MediaKind::Image),
        "video" => Ok(MediaKind::Video),
        "3d" | "threed" => Ok(MediaKind::ThreeD),
        "music" => Ok(MediaKind::Music),
        other => bail!("unknown kind '{}'; valid values: image, video, 3d, music", other),
    }
}
