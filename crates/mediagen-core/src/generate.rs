//! High-level generation facade
//!
//! Ties together payload shaping, remote invocation and output URL
//! resolution, one method per media kind. Everything here is blocking;
//! async callers wrap these in their own blocking task.

use crate::client::RemoteClient;
use crate::config::MediagenConfig;
use crate::error::Result;
use crate::kind::MediaKind;
use crate::models::{self, ImageModel, ImageOptions, MusicOptions, ThreeDModel, ThreeDOptions, VideoModel, VideoOptions};
use crate::output::extract_url;
use crate::result::MediaResult;
use serde_json::json;

/// Blocking generation entry point shared by the CLI and the HTTP service
pub struct Generator {
    client: RemoteClient,
}

impl Generator {
    pub fn new(config: &MediagenConfig) -> Self {
        Self {
            client: RemoteClient::from_config(config),
        }
    }

    /// True when a bearer token is configured
    pub fn has_token(&self) -> bool {
        self.client.has_token()
    }

    /// Generate an image from a prompt
    pub fn generate_image(&self, model_name: &str, options: &ImageOptions) -> Result<MediaResult> {
        let model = ImageModel::from_name(model_name)?;
        let request = models::image::build_request(model, options)?;
        let output = self.client.invoke(&request)?;
        let url = extract_url(&output)?;

        Ok(
            MediaResult::new(MediaKind::Image, model.name(), &options.prompt, url).with_metadata(
                json!({
                    "aspect_ratio": options.aspect_ratio,
                    "output_format": options.output_format,
                }),
            ),
        )
    }

    /// Generate a video clip from a prompt, optionally driven by a source
    /// image for the image-to-video variants
    pub fn generate_video(&self, model_name: &str, options: &VideoOptions) -> Result<MediaResult> {
        let model = VideoModel::from_name(model_name)?;
        let request = models::video::build_request(model, options)?;
        let output = self.client.invoke(&request)?;
        let url = extract_url(&output)?;

        Ok(
            MediaResult::new(MediaKind::Video, model.name(), &options.prompt, url).with_metadata(
                json!({
                    "aspect_ratio": options.aspect_ratio,
                    "source_image": options.image_url,
                    "seed": options.seed,
                }),
            ),
        )
    }

    /// Generate a 3D mesh from a source image URL
    pub fn generate_threed(
        &self,
        model_name: &str,
        options: &ThreeDOptions,
    ) -> Result<MediaResult> {
        let model = ThreeDModel::from_name(model_name)?;
        let request = models::threed::build_request(model, options)?;
        let output = self.client.invoke(&request)?;
        let url = extract_url(&output)?;

        // 3D jobs have no prompt; record the source image instead
        Ok(
            MediaResult::new(MediaKind::ThreeD, model.name(), &options.image_url, url)
                .with_metadata(json!({
                    "source_image": options.image_url,
                    "seed": options.seed,
                    "remove_background": options.remove_background,
                })),
        )
    }

    /// Generate a music clip from a prompt
    pub fn generate_music(&self, options: &MusicOptions) -> Result<MediaResult> {
        let request = models::music::build_request(options)?;
        let output = self.client.invoke(&request)?;
        let url = extract_url(&output)?;

        Ok(
            MediaResult::new(MediaKind::Music, "musicgen", &options.prompt, url).with_metadata(
                json!({
                    "duration": options.duration,
                    "model_version": options.model_version,
                }),
            ),
        )
    }
}
