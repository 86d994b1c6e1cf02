use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::{MediaCommandBuilder, MediaProcessorTrait};
use crate::config::MediaConfig;
use crate::error::{Result, UniqvidError};

/// Concrete implementation of media processor (FFmpeg-based)
pub struct MediaProcessorImpl {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl MediaProcessorImpl {
    /// Create a new media processor implementation
    pub fn new(config: MediaConfig) -> Self {
        let command_builder =
            MediaCommandBuilder::new(&config.binary_path, &config.probe_binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    /// Probe a video file and return its duration in seconds
    async fn probe_duration(&self, video_path: &Path) -> Result<f64> {
        debug!("Probing duration of {}", video_path.display());

        let command = self.command_builder.probe_duration(video_path);
        let stdout = command.execute_stdout().await?;

        stdout.trim().parse::<f64>().map_err(|e| {
            UniqvidError::Media(format!(
                "Failed to parse duration of {}: {}",
                video_path.display(),
                e
            ))
        })
    }

    /// Re-encode a video, applying the given filter chain
    async fn encode(
        &self,
        input_path: &Path,
        output_path: &Path,
        filters: &[String],
    ) -> Result<()> {
        info!("Encoding {} -> {}", input_path.display(), output_path.display());

        let command = self.command_builder.encode(
            input_path,
            output_path,
            filters,
            &self.config.encode_options,
        );

        command.execute().await?;

        info!("Encoding completed successfully");
        Ok(())
    }

    /// Check if the media processor is available
    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("-version")
            .output()
            .map_err(|e| UniqvidError::Media(format!("Media processor not found: {}", e)))?;

        if output.status.success() {
            info!("Media processor is available");
            Ok(())
        } else {
            Err(UniqvidError::Media(
                "Media processor version check failed".to_string(),
            ))
        }
    }

    /// Get media processor version information
    async fn get_version_info(&self) -> Result<String> {
        debug!("Getting media processor version information");

        let command = self.command_builder.version_check();
        let stdout = command.execute_stdout().await?;

        // The first line typically contains the version
        let first_line = stdout.lines().next().unwrap_or("Unknown version");
        Ok(first_line.to_string())
    }
}
