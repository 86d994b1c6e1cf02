//! Uniqvid - Video Uniquification Toolkit
//!
//! This is the main entry point for the uniqvid application, which collects
//! local or remote video files, applies cosmetic transforms, and re-encodes
//! each one under a new filename using ffmpeg.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use uniqvid::cli::{Args, Commands};
use uniqvid::config::Config;
use uniqvid::effects::EffectSettings;
use uniqvid::uniquifier::VideoUniquifier;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Process {
            path,
            url,
            output,
            remove_sources,
            fade_in,
            fade_out,
            color_multiplier,
            gamma,
            mirror_horizontal,
            mirror_vertical,
        } => {
            let mut uniquifier = VideoUniquifier::new(config, args.verbose)?;

            for p in &path {
                uniquifier.add_path(p, remove_sources).await?;
            }
            for u in &url {
                uniquifier.add_url(u).await?;
            }

            if uniquifier.is_empty() {
                warn!("No videos were registered, nothing to do");
                return Ok(());
            }
            info!("Registered {} clip(s)", uniquifier.len());

            let settings = EffectSettings {
                fade_in,
                fade_out,
                color_multiplier,
                gamma,
                mirror_horizontal,
                mirror_vertical,
            };
            if !settings.is_empty() {
                uniquifier.apply_effects(&settings);
            }

            uniquifier.save_videos(&output).await?;
            info!("Saved {} clip(s) to {}", uniquifier.len(), output.display());
        }
        Commands::Check => {
            let uniquifier = VideoUniquifier::new(config, args.verbose)?;
            let version = uniquifier.encoder_version().await?;
            println!("{}", version);
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let app_dir = std::env::current_dir()?.join(".uniqvid");
    let log_dir = app_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "uniqvid.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer().with_target(false);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
