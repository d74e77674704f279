use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::*;
use std::sync::Arc;
use swingcoach::{CoachSession, FfmpegFrameExtractor, VideoResource};
use swingcoach_core::{get_default_config_file, CoachConfig, GeminiClient};
use tracing::{info, warn};

mod app;
mod cli;
mod logging;
mod output;

use crate::cli::Args;
use crate::logging::init_logging;

const APP_NAME: &str = "swingcoach";

/// Layers config file, environment and command line, in that order
fn load_config(args: &Args) -> Result<CoachConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => get_default_config_file(APP_NAME).ok(),
    };

    let file_config = match &path {
        Some(path) => CoachConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => CoachConfig::default(),
    };

    let cli_layer = CoachConfig {
        api_key: args.api_key.clone(),
        api_base_url: args.api_base_url.clone(),
        model_name: args.model.clone(),
        frame_offsets_ms: args.offsets.clone(),
        frames_dir: args.frames_dir.clone(),
        ffmpeg_path: args.ffmpeg.clone(),
        conversation_history_turns: args.history_turns,
        ..CoachConfig::empty()
    };

    Ok(file_config.with_env_overrides().merge(&cli_layer))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(config.log_level.as_deref(), args.verbose);

    if !args.video.exists() {
        warn!(video = %args.video.display(), "Video file does not exist");
    }

    let client = GeminiClient::new(&config).map_err(|e| {
        eprintln!("{}", format!("Error initializing Gemini client: {}", e).red());
        anyhow!(e)
    })?;
    info!(model = ?config.model_name, "Initialized Gemini client");

    // Frames belong to the session: a temporary directory is removed on exit
    let (frames_dir, _temp_frames) = match &config.frames_dir {
        Some(dir) => (dir.clone(), None),
        None => {
            let temp = tempfile::tempdir().context("Failed to create frame directory")?;
            (temp.path().to_path_buf(), Some(temp))
        }
    };

    let mut extractor = FfmpegFrameExtractor::new(frames_dir);
    if let Some(ffmpeg) = &config.ffmpeg_path {
        extractor = extractor.with_binary(ffmpeg.clone());
    }

    info!(frames_dir = %extractor.output_dir().display(), "Frames will be written here");

    let session = CoachSession::new(&config, Arc::new(client), Arc::new(extractor));
    info!(session = %session.id(), "Session started");

    let video = VideoResource::from_path(&args.video);
    app::run_analysis(&session, &video).await?;

    if !args.no_chat {
        app::run_interactive_chat(&session).await?;
    }

    info!(session = %session.id(), "Session ended");
    Ok(())
}
