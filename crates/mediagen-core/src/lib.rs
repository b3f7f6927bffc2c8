//! Mediagen Core - generative media pipeline
//!
//! Shapes per-model request payloads, invokes a remote generation service
//! for images, video, 3D meshes and music, resolves artifact URLs out of
//! heterogeneous output shapes, and downloads results to disk. Shared by
//! the HTTP service and the CLI.

pub mod batch;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod generate;
pub mod kind;
pub mod merge;
pub mod models;
pub mod output;
pub mod result;

pub use batch::{run_parallel, BatchOutcome, MAX_WORKERS};
pub use client::RemoteClient;
pub use config::MediagenConfig;
pub use download::{download_artifact, DownloadedArtifact};
pub use error::{MediagenError, Result};
pub use generate::Generator;
pub use kind::MediaKind;
pub use models::{
    BuiltRequest, ImageModel, ImageOptions, MusicOptions, ThreeDModel, ThreeDOptions, VideoModel,
    VideoOptions,
};
pub use output::{extract_url, RemoteOutput};
pub use result::{MediaResult, MediaStore};
