use anyhow::{Context, Result};
use clap::Subcommand;
use mediagen_core::{
    download_artifact, Generator, ImageOptions, MediaResult, MediagenConfig, MusicOptions,
    ThreeDOptions, VideoOptions,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum GenerateCommands {
    /// Generate an image from a prompt
    Image {
        /// Prompt text
        prompt: String,

        /// Image model name (see `mediagen models --kind image`)
        #[arg(long, default_value = "flux-schnell")]
        model: String,

        /// Aspect ratio, e.g. 16:9, 1:1, 3:2
        #[arg(long, default_value = "3:2")]
        aspect_ratio: String,

        /// Things the model should avoid
        #[arg(long)]
        negative_prompt: Option<String>,

        /// Download the artifact after generation
        #[arg(long)]
        download: bool,
    },

    /// Generate a video clip
    Video {
        /// Prompt text
        prompt: String,

        /// Video model name (see `mediagen models --kind video`)
        #[arg(long, default_value = "wan-t2v-480p")]
        model: String,

        /// Source image URL (required for the i2v variants)
        #[arg(long)]
        image_url: Option<String>,

        /// Seed for reproducible variants
        #[arg(long)]
        seed: Option<i64>,

        /// Aspect ratio for the text-to-video variants
        #[arg(long, default_value = "16:9")]
        aspect_ratio: String,

        /// Clip length in seconds (veo2 only)
        #[arg(long, default_value = "5")]
        duration: u32,

        /// Download the artifact after generation
        #[arg(long)]
        download: bool,
    },

    /// Generate a 3D mesh from a source image URL
    Threed {
        /// Source image URL (must be http or https)
        image_url: String,

        /// 3D model name (see `mediagen models --kind 3d`)
        #[arg(long, default_value = "hunyuan3d")]
        model: String,

        /// Seed for reproducibility
        #[arg(long)]
        seed: Option<i64>,

        /// Keep the source image background instead of removing it
        #[arg(long)]
        keep_background: bool,

        /// Download the artifact after generation
        #[arg(long)]
        download: bool,
    },

    /// Generate a music clip from a prompt
    Music {
        /// Prompt text
        prompt: String,

        /// Clip length in seconds
        #[arg(long, default_value = "8")]
        duration: u32,

        /// Download the artifact after generation
        #[arg(long)]
        download: bool,
    },
}

pub fn run(cmd: GenerateCommands) -> Result<()> {
    let config = MediagenConfig::load()?;
    let generator = Generator::new(&config);
    if !generator.has_token() {
        eprintln!("warning: no API token configured; the request will fail");
    }

    match cmd {
        GenerateCommands::Image {
            prompt,
            model,
            aspect_ratio,
            negative_prompt,
            download,
        } => {
            let options = ImageOptions {
                prompt,
                negative_prompt,
                aspect_ratio,
                ..Default::default()
            };
            let result = generator.generate_image(&model, &options)?;
            finish(&result, download, &config)
        }
        GenerateCommands::Video {
            prompt,
            model,
            image_url,
            seed,
            aspect_ratio,
            duration,
            download,
        } => {
            let options = VideoOptions {
                prompt,
                image_url,
                seed,
                aspect_ratio,
                duration,
            };
            let result = generator.generate_video(&model, &options)?;
            finish(&result, download, &config)
        }
        GenerateCommands::Threed {
            image_url,
            model,
            seed,
            keep_background,
            download,
        } => {
            let mut options = ThreeDOptions {
                image_url,
                remove_background: !keep_background,
                ..Default::default()
            };
            if let Some(seed) = seed {
                options.seed = seed;
            }
            let result = generator.generate_threed(&model, &options)?;
            finish(&result, download, &config)
        }
        GenerateCommands::Music {
            prompt,
            duration,
            download,
        } => {
            let options = MusicOptions {
                prompt,
                duration,
                ..Default::default()
            };
            let result = generator.generate_music(&options)?;
            finish(&result, download, &config)
        }
    }
}

fn finish(result: &MediaResult, download: bool, config: &MediagenConfig) -> Result<()> {
    println!("Generated {} ({})", result.id, result.model);
    match &result.url {
        Some(url) => println!("  url: {}", url),
        None => println!("  no artifact URL returned"),
    }

    if download {
        let url = result
            .url
            .as_deref()
            .context("nothing to download: the model returned no artifact URL")?;
        let artifact = download_artifact(url, Path::new(config.output_root()), result.kind)?;
        println!(
            "  saved: {} ({} bytes, {})",
            artifact.path.display(),
            artifact.bytes,
            artifact.content_hash
        );
    }

    Ok(())
}
