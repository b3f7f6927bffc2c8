//! Mediagen CLI - command-line interface for generative media

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{batch, generate, models};

#[derive(Parser)]
#[command(name = "mediagen")]
#[command(about = "Generate images, video, 3D meshes and music via remote models", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available models
    Models {
        /// Restrict to one kind (image, video, 3d, music)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Generate a single piece of media
    #[command(subcommand)]
    Generate(generate::GenerateCommands),

    /// Run a multi-model batch for one prompt
    Batch(batch::BatchArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Models { kind } => models::run(kind.as_deref()),
        Commands::Generate(cmd) => generate::run(cmd),
        Commands::Batch(args) => batch::run(args),
    }
}
