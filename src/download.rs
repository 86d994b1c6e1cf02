use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};
use url::Url;

use crate::config::DownloadConfig;
use crate::error::Result;

/// Derive a deterministic, filesystem-safe filename from a URL.
///
/// The name is the host (with port, when present) followed by the path
/// segments, each truncated to 10 characters and joined with dots, capped at
/// 255 characters overall. Two URLs that collapse to the same name are
/// treated as the same download.
pub fn url_to_filename(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;

    let host = match parsed.port() {
        Some(port) => format!("{}:{}", parsed.host_str().unwrap_or_default(), port),
        None => parsed.host_str().unwrap_or_default().to_string(),
    };

    let segments = parsed
        .path()
        .split('/')
        .map(|segment| segment.chars().take(10).collect::<String>())
        .collect::<Vec<_>>()
        .join(".");

    let name: String = format!("{}{}", host, segments).chars().take(255).collect();
    Ok(sanitize_filename(&name))
}

/// Strip characters that are unsafe in filenames on common filesystems.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect()
}

/// Abstraction over fetching a remote video to a local file.
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    /// Download `url` into `dest`.
    ///
    /// Returns `Ok(false)` when the server answers with a non-200 status or an
    /// empty body; transport-level failures propagate as errors. The request
    /// is attempted exactly once.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<bool>;
}

/// HTTP implementation of [`VideoFetcher`] backed by reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl VideoFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<bool> {
        info!("Downloading {} -> {}", url, dest.display());

        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            debug!("Download of {} rejected with status {}", url, response.status());
            return Ok(false);
        }

        let pb = ProgressBar::new(response.content_length().unwrap_or(0));
        pb.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-"));

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            pb.finish_and_clear();
            debug!("Download of {} returned an empty body", url);
            return Ok(false);
        }

        pb.set_length(bytes.len() as u64);
        pb.set_position(bytes.len() as u64);

        fs::write(dest, &bytes).await?;

        pb.finish_and_clear();
        info!("Downloaded {} bytes to {}", bytes.len(), dest.display());
        Ok(true)
    }
}

/// Factory for creating fetcher instances
pub struct VideoFetcherFactory;

impl VideoFetcherFactory {
    /// Create the default HTTP-backed fetcher
    pub fn create_default(config: &DownloadConfig) -> Result<Box<dyn VideoFetcher>> {
        Ok(Box::new(HttpFetcher::new(config)?))
    }
}
