use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, UniqvidError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub media: MediaConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Path to ffprobe binary
    pub probe_binary_path: String,
    /// Additional encoding options passed before the output file
    /// Common options: ["-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
    /// - preset: encoding speed (ultrafast, fast, medium, slow, veryslow)
    /// - crf: quality (0-51, lower = better quality, 23 is default)
    /// - pix_fmt: pixel format for compatibility
    pub encode_options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// User agent sent with download requests
    pub user_agent: String,
    /// Directory where downloaded temp files are written
    pub temp_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media: MediaConfig {
                binary_path: "ffmpeg".to_string(),
                probe_binary_path: "ffprobe".to_string(),
                encode_options: vec![],
            },
            download: DownloadConfig {
                user_agent: "uniqvid/0.1.0".to_string(),
                temp_dir: PathBuf::from("."),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| UniqvidError::Config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| UniqvidError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| UniqvidError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.media.binary_path, "ffmpeg");
        assert_eq!(parsed.media.probe_binary_path, "ffprobe");
        assert_eq!(parsed.download.temp_dir, PathBuf::from("."));
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.media.binary_path, "ffmpeg");
    }
}
