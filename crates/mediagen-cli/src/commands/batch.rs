//! Multi-stage batch generation
//!
//! Runs one prompt through several image models in parallel, then
//! optionally chains 3D, video and music stages off the results. Stage
//! failures are reported and skipped; the batch keeps going.

use anyhow::{bail, Result};
use clap::Args;
use mediagen_core::{
    download_artifact, merge, run_parallel, Generator, ImageModel, ImageOptions, MediaResult,
    MediagenConfig, MusicOptions, ThreeDOptions, VideoModel, VideoOptions,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args)]
pub struct BatchArgs {
    /// Prompt shared by every stage
    pub prompt: String,

    /// Comma-separated image models to run in parallel, or "all"
    #[arg(long, default_value = "flux-schnell", value_delimiter = ',')]
    pub models: Vec<String>,

    /// Aspect ratio for the image stage
    #[arg(long, default_value = "3:2")]
    pub aspect_ratio: String,

    /// Build a 3D mesh from the first generated image
    #[arg(long)]
    pub threed: bool,

    /// 3D model to use with --threed
    #[arg(long, default_value = "hunyuan3d")]
    pub threed_model: String,

    /// Generate a video clip
    #[arg(long)]
    pub video: bool,

    /// Video model to use with --video
    #[arg(long, default_value = "wan-i2v-480p")]
    pub video_model: String,

    /// Generate a music clip
    #[arg(long)]
    pub music: bool,

    /// Merge the video and music stages into one clip (implies --video --music)
    #[arg(long)]
    pub merge: bool,

    /// Skip downloading artifacts (disables --merge)
    #[arg(long)]
    pub skip_download: bool,
}

struct StageTracker {
    succeeded: usize,
    failed: usize,
}

impl StageTracker {
    fn new() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
        }
    }
}

pub fn run(mut args: BatchArgs) -> Result<()> {
    if args.merge {
        args.video = true;
        args.music = true;
        if args.skip_download {
            bail!("--merge needs downloaded artifacts; drop --skip-download");
        }
    }

    if args.models == ["all"] {
        args.models = mediagen_core::models::image::MODEL_NAMES
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    // reject bad names before spending money on any stage
    for name in &args.models {
        ImageModel::from_name(name)?;
    }
    if args.video {
        VideoModel::from_name(&args.video_model)?;
    }

    let config = MediagenConfig::load()?;
    let generator = Arc::new(Generator::new(&config));
    if !generator.has_token() {
        eprintln!("warning: no API token configured; all stages will fail");
    }

    let output_root = PathBuf::from(config.output_root());
    let mut tracker = StageTracker::new();

    println!("Batch: \"{}\"", args.prompt);
    println!(
        "Image stage: {} model(s) in parallel",
        args.models.len()
    );

    let jobs: Vec<(String, Box<dyn FnOnce() -> mediagen_core::Result<MediaResult> + Send>)> =
        args.models
            .iter()
            .map(|model| {
                let generator = Arc::clone(&generator);
                let model = model.clone();
                let options = ImageOptions {
                    prompt: args.prompt.clone(),
                    aspect_ratio: args.aspect_ratio.clone(),
                    ..Default::default()
                };
                let label = model.clone();
                let job: Box<dyn FnOnce() -> mediagen_core::Result<MediaResult> + Send> =
                    Box::new(move || generator.generate_image(&model, &options));
                (label, job)
            })
            .collect();

    let mut images: Vec<MediaResult> = Vec::new();
    for outcome in run_parallel(jobs) {
        match outcome.result {
            Ok(result) => {
                println!("  {} -> {}", outcome.label, result.id);
                maybe_download(&result, &output_root, args.skip_download, &mut tracker);
                images.push(result);
            }
            Err(e) => {
                println!("  {} FAILED: {}", outcome.label, e);
                tracker.failed += 1;
            }
        }
    }

    let source_image = images.iter().find_map(|r| r.url.clone());

    if args.threed {
        match &source_image {
            Some(url) => {
                println!("3D stage: {} from {}", args.threed_model, url);
                let options = ThreeDOptions {
                    image_url: url.clone(),
                    ..Default::default()
                };
                run_stage(
                    generator.generate_threed(&args.threed_model, &options),
                    &output_root,
                    args.skip_download,
                    &mut tracker,
                );
            }
            None => {
                println!("3D stage skipped: no image URL to work from");
                tracker.failed += 1;
            }
        }
    }

    let mut video_path: Option<PathBuf> = None;
    if args.video {
        println!("Video stage: {}", args.video_model);
        let options = VideoOptions {
            prompt: args.prompt.clone(),
            image_url: source_image.clone(),
            ..Default::default()
        };
        video_path = run_stage(
            generator.generate_video(&args.video_model, &options),
            &output_root,
            args.skip_download,
            &mut tracker,
        );
    }

    let mut music_path: Option<PathBuf> = None;
    if args.music {
        println!("Music stage");
        let options = MusicOptions {
            prompt: args.prompt.clone(),
            ..Default::default()
        };
        music_path = run_stage(
            generator.generate_music(&options),
            &output_root,
            args.skip_download,
            &mut tracker,
        );
    }

    if args.merge {
        match (&video_path, &music_path) {
            (Some(video), Some(music)) => {
                let output = output_root.join("videos").join("merged.mp4");
                match merge::merge_video_audio(video, music, &output) {
                    Ok(path) => {
                        println!("Merged clip: {}", path.display());
                        tracker.succeeded += 1;
                    }
                    Err(e) => {
                        println!("Merge FAILED: {}", e);
                        tracker.failed += 1;
                    }
                }
            }
            _ => {
                println!("Merge skipped: missing a downloaded video or music track");
                tracker.failed += 1;
            }
        }
    }

    println!(
        "\nBatch done: {} succeeded, {} failed",
        tracker.succeeded, tracker.failed
    );
    Ok(())
}

/// Print a stage outcome and download its artifact when requested.
/// Returns the local path when one was written.
fn run_stage(
    result: mediagen_core::Result<MediaResult>,
    output_root: &Path,
    skip_download: bool,
    tracker: &mut StageTracker,
) -> Option<PathBuf> {
    match result {
        Ok(result) => {
            println!("  {} -> {}", result.model, result.id);
            maybe_download(&result, output_root, skip_download, tracker)
        }
        Err(e) => {
            println!("  FAILED: {}", e);
            tracker.failed += 1;
            None
        }
    }
}

fn maybe_download(
    result: &MediaResult,
    output_root: &Path,
    skip_download: bool,
    tracker: &mut StageTracker,
) -> Option<PathBuf> {
    if skip_download {
        tracker.succeeded += 1;
        if let Some(url) = &result.url {
            println!("    url: {}", url);
        }
        return None;
    }

    let url = match result.url.as_deref() {
        Some(url) => url,
        None => {
            println!("    no artifact URL returned");
            tracker.failed += 1;
            return None;
        }
    };

    match download_artifact(url, output_root, result.kind) {
        Ok(artifact) => {
            println!("    saved: {}", artifact.path.display());
            tracker.succeeded += 1;
            Some(artifact.path)
        }
        Err(e) => {
            println!("    download FAILED: {}", e);
            tracker.failed += 1;
            None
        }
    }
}
