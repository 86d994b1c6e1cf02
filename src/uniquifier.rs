use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::detect;
use crate::download::{VideoFetcher, VideoFetcherFactory, url_to_filename};
use crate::effects::{self, EffectSettings};
use crate::error::Result;
use crate::media::{MediaProcessorFactory, MediaProcessorTrait};

/// Marker prepended to downloaded temp files
const TEMP_PREFIX: &str = "temp_";
/// Suffix appended to every output filename
const UNIQ_SUFFIX: &str = "_uniq";
/// Container used for re-encoded output
const OUTPUT_CONTAINER: &str = "mp4";

/// Where a clip came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOrigin {
    Local,
    Downloaded,
}

/// Probed stream metadata plus the filter chain accumulated for one clip.
///
/// Materialized eagerly when the clip is registered; effects transform the
/// handle, never the source file.
#[derive(Debug, Clone)]
pub struct ClipHandle {
    duration: f64,
    filters: Vec<String>,
}

impl ClipHandle {
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }
}

/// One registered clip: source location, origin, lifecycle flag, and the
/// exclusively-owned handle.
#[derive(Debug)]
pub struct ClipRecord {
    pub path: PathBuf,
    pub origin: ClipOrigin,
    pub remove_after_save: bool,
    pub handle: ClipHandle,
}

/// Ordered registry of clips plus the operations that fill, transform, and
/// save it.
pub struct VideoUniquifier {
    config: Config,
    verbose: bool,
    media: Box<dyn MediaProcessorTrait>,
    fetcher: Box<dyn VideoFetcher>,
    clips: Vec<ClipRecord>,
}

impl VideoUniquifier {
    pub fn new(config: Config, verbose: bool) -> Result<Self> {
        let media = MediaProcessorFactory::create_processor(config.media.clone());
        let fetcher = VideoFetcherFactory::create_default(&config.download)?;

        // Check dependencies
        media.check_availability()?;

        Ok(Self::from_parts(config, verbose, media, fetcher))
    }

    /// Assemble a uniquifier from explicit components
    pub fn from_parts(
        config: Config,
        verbose: bool,
        media: Box<dyn MediaProcessorTrait>,
        fetcher: Box<dyn VideoFetcher>,
    ) -> Self {
        Self {
            config,
            verbose,
            media,
            fetcher,
            clips: Vec::new(),
        }
    }

    pub fn clips(&self) -> &[ClipRecord] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Register a local path and/or a remote URL in one call.
    ///
    /// Returns true when at least one of the two variants registered
    /// something; both may run in the same call.
    pub async fn add(
        &mut self,
        path: Option<&Path>,
        url: Option<&str>,
        remove_after_save: bool,
    ) -> Result<bool> {
        let mut added = false;
        if let Some(path) = path {
            added |= self.add_path(path, remove_after_save).await?;
        }
        if let Some(url) = url {
            added |= self.add_url(url).await?;
        }
        Ok(added)
    }

    /// Register a local video file, or every video file directly inside a
    /// directory (non-recursive, content-sniffed).
    ///
    /// Returns true iff at least one file was registered. A missing path, a
    /// non-video file, or an already-registered path yields false without
    /// side effects.
    pub async fn add_path(&mut self, path: &Path, remove_after_save: bool) -> Result<bool> {
        if self.is_registered(path) {
            if self.verbose {
                warn!("Path \"{}\" is already added, skipping", path.display());
            }
            return Ok(false);
        }

        if path.is_dir() {
            let mut registered = 0usize;
            for entry in WalkDir::new(path)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let file = entry.path();
                if !file.is_file() || !detect::is_video_file(file) {
                    continue;
                }
                if self.is_registered(file) {
                    if self.verbose {
                        warn!("Path \"{}\" is already added, skipping", file.display());
                    }
                    continue;
                }
                self.register(file.to_path_buf(), ClipOrigin::Local, remove_after_save)
                    .await?;
                registered += 1;
            }
            if registered > 0 {
                return Ok(true);
            }
        } else if path.is_file() && detect::is_video_file(path) {
            self.register(path.to_path_buf(), ClipOrigin::Local, remove_after_save)
                .await?;
            return Ok(true);
        }

        if self.verbose {
            warn!("Path \"{}\" is invalid, skipping", path.display());
        }
        Ok(false)
    }

    /// Download a remote video and register the temp copy.
    ///
    /// Deduplication compares the derived temp filename, not the URL string;
    /// the deletion flag of a downloaded clip is always set. A non-200 status
    /// or empty body yields false; transport errors propagate.
    pub async fn add_url(&mut self, url: &str) -> Result<bool> {
        let filename = url_to_filename(url)?;
        let dl_path = self
            .config
            .download
            .temp_dir
            .join(format!("{}{}", TEMP_PREFIX, filename));

        if self.is_registered(&dl_path) {
            if self.verbose {
                warn!("URL \"{}\" is already added, skipping", url);
            }
            return Ok(false);
        }

        if self.fetcher.fetch(url, &dl_path).await? {
            self.register(dl_path, ClipOrigin::Downloaded, true).await?;
            return Ok(true);
        }

        if self.verbose {
            warn!("URL \"{}\" is invalid, skipping", url);
        }
        Ok(false)
    }

    /// Apply the requested transforms to every registered clip, replacing
    /// each handle with the transformed result.
    ///
    /// The order is fixed (fade-in, fade-out, color multiply, gamma,
    /// mirror-horizontal, mirror-vertical); repeated calls accumulate.
    pub fn apply_effects(&mut self, settings: &EffectSettings) {
        for clip in &mut self.clips {
            let filters = effects::filter_chain(settings, clip.handle.duration);
            clip.handle.filters.extend(filters);
        }
    }

    /// Encode every registered clip into `folder` under its derived filename.
    ///
    /// Each clip gets exactly one randomized color-balance directive on top
    /// of its accumulated filters. Sources flagged for removal are deleted
    /// after their encode finishes; registry entries themselves are never
    /// removed. Encoder failures propagate.
    pub async fn save_videos<P: AsRef<Path>>(&self, folder: P) -> Result<()> {
        let folder = folder.as_ref();
        fs::create_dir_all(folder).await?;

        for clip in &self.clips {
            let mut filters = clip.handle.filters.clone();
            filters.push(effects::color_balance_directive());

            let output_path = folder.join(output_filename(clip));
            self.media.encode(&clip.path, &output_path, &filters).await?;

            if clip.remove_after_save {
                fs::remove_file(&clip.path).await?;
                info!("Removed source file {}", clip.path.display());
            }
        }

        Ok(())
    }

    /// Report the encoder's version line
    pub async fn encoder_version(&self) -> Result<String> {
        self.media.get_version_info().await
    }

    async fn register(
        &mut self,
        path: PathBuf,
        origin: ClipOrigin,
        remove_after_save: bool,
    ) -> Result<()> {
        // Eager open: the handle is materialized at registration time
        let duration = self.media.probe_duration(&path).await?;
        info!("Registered {} ({:.2}s)", path.display(), duration);

        self.clips.push(ClipRecord {
            path,
            origin,
            remove_after_save,
            handle: ClipHandle {
                duration,
                filters: Vec::new(),
            },
        });
        Ok(())
    }

    fn is_registered(&self, path: &Path) -> bool {
        let candidate = resolve_path(path);
        self.clips
            .iter()
            .any(|clip| clip.path.as_path() == path || resolve_path(&clip.path) == candidate)
    }
}

/// Compare paths by their fully resolved form when possible.
fn resolve_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Derive the output filename for a clip.
///
/// Downloaded clips drop the temp marker and any container-extension remnant
/// left over from the URL before the uniquifying suffix is appended.
fn output_filename(clip: &ClipRecord) -> String {
    let stem = match clip.origin {
        ClipOrigin::Local => clip
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ClipOrigin::Downloaded => {
            let name = clip
                .path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = name.strip_prefix(TEMP_PREFIX).unwrap_or(&name);
            strip_container_extension(name)
        }
    };

    format!("{}{}.{}", stem, UNIQ_SUFFIX, OUTPUT_CONTAINER)
}

fn strip_container_extension(name: &str) -> String {
    for ext in detect::VIDEO_EXTENSIONS {
        if let Some(stripped) = name.strip_suffix(&format!(".{}", ext)) {
            return stripped.to_string();
        }
    }
    name.to_string()
}
