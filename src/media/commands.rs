use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{Result, UniqvidError};

/// Abstract media processing command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Copy audio stream
    pub fn copy_audio(self) -> Self {
        self.audio_codec("copy")
    }

    /// Add video filter
    pub fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-vf").arg(filter)
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        self.run().map(|_| ())
    }

    /// Execute the command and return its stdout
    pub async fn execute_stdout(&self) -> Result<String> {
        let output = self.run()?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run(&self) -> Result<std::process::Output> {
        debug!("Executing media processing command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .map_err(|e| UniqvidError::Media(format!("Failed to execute media processor: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(UniqvidError::Media(format!(
                "{} failed: {}",
                self.description, stderr
            )));
        }

        Ok(output)
    }
}

/// Builder for the media processing operations used by the uniquifier
pub struct MediaCommandBuilder {
    binary_path: String,
    probe_binary_path: String,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, probe_binary_path: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            probe_binary_path: probe_binary_path.into(),
        }
    }

    /// Build a re-encoding command that applies a filter chain
    pub fn encode<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: P,
        filters: &[String],
        additional_options: &[String],
    ) -> MediaCommand {
        let mut cmd = MediaCommand::new(&self.binary_path, "Video encoding")
            .overwrite()
            .input(&input_path)
            .video_filter(filters.join(","))
            .video_codec("libx264")
            .copy_audio();

        // Add user-specified additional options
        for option in additional_options {
            cmd = cmd.arg(option);
        }

        cmd.output(output_path)
    }

    /// Build a duration probe command
    pub fn probe_duration<P: AsRef<Path>>(&self, input_path: P) -> MediaCommand {
        MediaCommand::new(&self.probe_binary_path, "Duration probe")
            .arg("-v").arg("error")
            .arg("-show_entries").arg("format=duration")
            .arg("-of").arg("default=noprint_wrappers=1:nokey=1")
            .arg(input_path.as_ref().to_string_lossy().to_string())
    }

    /// Build a version check command
    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check").arg("-version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_encode_command_args() {
        let builder = MediaCommandBuilder::new("ffmpeg", "ffprobe");
        let filters = vec!["hflip".to_string(), "colorbalance=rs=0.073".to_string()];
        let extras = vec!["-preset".to_string(), "fast".to_string()];

        let cmd = builder.encode(
            PathBuf::from("in.mp4"),
            PathBuf::from("out/in_uniq.mp4"),
            &filters,
            &extras,
        );

        assert_eq!(cmd.binary_path, "ffmpeg");
        assert_eq!(
            cmd.args,
            vec![
                "-y",
                "-i", "in.mp4",
                "-vf", "hflip,colorbalance=rs=0.073",
                "-c:v", "libx264",
                "-c:a", "copy",
                "-preset", "fast",
                "out/in_uniq.mp4",
            ]
        );
    }

    #[test]
    fn test_probe_command_args() {
        let builder = MediaCommandBuilder::new("ffmpeg", "ffprobe");
        let cmd = builder.probe_duration(PathBuf::from("in.mp4"));

        assert_eq!(cmd.binary_path, "ffprobe");
        assert_eq!(
            cmd.args,
            vec![
                "-v", "error",
                "-show_entries", "format=duration",
                "-of", "default=noprint_wrappers=1:nokey=1",
                "in.mp4",
            ]
        );
    }
}
