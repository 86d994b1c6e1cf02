use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect videos, apply transforms, and save unique copies
    Process {
        /// Local video file or directory (repeatable)
        #[arg(short, long)]
        path: Vec<PathBuf>,

        /// Remote video URL (repeatable)
        #[arg(short, long)]
        url: Vec<String>,

        /// Output directory for re-encoded files
        #[arg(short, long)]
        output: PathBuf,

        /// Delete local source files after a successful save
        #[arg(long)]
        remove_sources: bool,

        /// Fade-in duration in seconds
        #[arg(long)]
        fade_in: Option<f64>,

        /// Fade-out duration in seconds
        #[arg(long)]
        fade_out: Option<f64>,

        /// Uniform RGB multiplier
        #[arg(long)]
        color_multiplier: Option<f64>,

        /// Gamma correction value
        #[arg(long)]
        gamma: Option<f64>,

        /// Flip the picture horizontally
        #[arg(long)]
        mirror_horizontal: bool,

        /// Flip the picture vertically
        #[arg(long)]
        mirror_vertical: bool,
    },

    /// Check encoder availability and print its version
    Check,
}
