// Media processing behind ffmpeg/ffprobe subprocesses:
// - processor: concrete implementation
// - commands: command assembly and execution

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;

pub use commands::*;
pub use processor::*;

use crate::config::MediaConfig;
use crate::error::Result;

/// Main trait for media processing operations
#[async_trait]
pub trait MediaProcessorTrait: Send + Sync {
    /// Probe a video file and return its duration in seconds
    async fn probe_duration(&self, video_path: &Path) -> Result<f64>;

    /// Re-encode a video, applying the given filter chain
    async fn encode(
        &self,
        input_path: &Path,
        output_path: &Path,
        filters: &[String],
    ) -> Result<()>;

    /// Check if the media processor is available
    fn check_availability(&self) -> Result<()>;

    /// Get media processor version information
    async fn get_version_info(&self) -> Result<String>;
}

/// Factory for creating media processor instances
pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    /// Create the default media processor implementation (FFmpeg-based)
    pub fn create_processor(config: MediaConfig) -> Box<dyn MediaProcessorTrait> {
        Box::new(processor::MediaProcessorImpl::new(config))
    }
}
