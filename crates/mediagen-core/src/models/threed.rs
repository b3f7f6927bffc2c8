//! 3D mesh model variants and payload shaping
//!
//! Both variants are image-to-3D and version-pinned because their output
//! shapes changed between upstream revisions. Trellis expects an `images`
//! list and renames the background flag to `return_no_background`.

use super::{unknown_model, validate_http_url, BuiltRequest};
use crate::error::Result;
use crate::kind::MediaKind;
use serde_json::json;
use std::fmt;

pub const MODEL_NAMES: &[&str] = &["hunyuan3d", "trellis"];

const HUNYUAN3D_VERSION: &str =
    "b1b9449a1277e10402781c5d41eb30c0a0683504fb23fab591ca9dfc2aabe1cb";
const TRELLIS_VERSION: &str =
    "4876f2a8da1c544772dffa32e8889da4a1bab3a1f5c1937bfcfccb99ae347251";

/// A named 3D model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreeDModel {
    Hunyuan3d,
    Trellis,
}

impl ThreeDModel {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hunyuan3d" => Ok(ThreeDModel::Hunyuan3d),
            "trellis" => Ok(ThreeDModel::Trellis),
            other => Err(unknown_model(MediaKind::ThreeD, other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThreeDModel::Hunyuan3d => "hunyuan3d",
            ThreeDModel::Trellis => "trellis",
        }
    }

    pub fn remote_path(&self) -> &'static str {
        match self {
            ThreeDModel::Hunyuan3d => "tencent/hunyuan3d-2",
            ThreeDModel::Trellis => "firtoz/trellis",
        }
    }

    pub fn version_pin(&self) -> &'static str {
        match self {
            ThreeDModel::Hunyuan3d => HUNYUAN3D_VERSION,
            ThreeDModel::Trellis => TRELLIS_VERSION,
        }
    }
}

impl fmt::Display for ThreeDModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options for 3D generation from a source image
#[derive(Debug, Clone)]
pub struct ThreeDOptions {
    pub image_url: String,
    pub seed: i64,
    pub remove_background: bool,
    // Hunyuan3D knobs
    pub steps: u32,
    pub guidance_scale: f64,
    pub octree_resolution: u32,
    // Trellis knobs
    pub texture_size: u32,
    pub mesh_simplify: f64,
    pub generate_color: bool,
    pub generate_normal: bool,
    pub randomize_seed: bool,
    pub save_gaussian_ply: bool,
    pub ss_sampling_steps: u32,
    pub slat_sampling_steps: u32,
    pub ss_guidance_strength: f64,
    pub slat_guidance_strength: f64,
}

impl Default for ThreeDOptions {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            seed: 1234,
            remove_background: true,
            steps: 50,
            guidance_scale: 5.5,
            octree_resolution: 256,
            texture_size: 1024,
            mesh_simplify: 0.9,
            generate_color: true,
            generate_normal: true,
            randomize_seed: false,
            save_gaussian_ply: false,
            ss_sampling_steps: 38,
            slat_sampling_steps: 12,
            ss_guidance_strength: 7.5,
            slat_guidance_strength: 3.0,
        }
    }
}

/// Build the remote request for a 3D model
pub fn build_request(model: ThreeDModel, options: &ThreeDOptions) -> Result<BuiltRequest> {
    validate_http_url(&options.image_url)?;

    let input = match model {
        ThreeDModel::Hunyuan3d => json!({
            "seed": options.seed,
            "image": options.image_url,
            "steps": options.steps,
            "guidance_scale": options.guidance_scale,
            "octree_resolution": options.octree_resolution,
            "remove_background": options.remove_background,
        }),
        ThreeDModel::Trellis => json!({
            "seed": if options.randomize_seed { 0 } else { options.seed },
            "images": [options.image_url],
            "texture_size": options.texture_size,
            "mesh_simplify": options.mesh_simplify,
            "generate_color": options.generate_color,
            "generate_model": true,
            "randomize_seed": options.randomize_seed,
            "generate_normal": options.generate_normal,
            "save_gaussian_ply": options.save_gaussian_ply,
            "ss_sampling_steps": options.ss_sampling_steps,
            "slat_sampling_steps": options.slat_sampling_steps,
            "return_no_background": options.remove_background,
            "ss_guidance_strength": options.ss_guidance_strength,
            "slat_guidance_strength": options.slat_guidance_strength,
        }),
    };

    Ok(BuiltRequest {
        model_path: model.remote_path().to_string(),
        version: Some(model.version_pin().to_string()),
        input,
    })
}
