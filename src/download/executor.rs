//! Download executor.
//!
//! [`Downloader`] is the seam between the chat front-end and the tool: the bot
//! only ever sees a [`DownloadResult`]. [`YtDlpDownloader`] is the production
//! implementation; tests substitute scripted downloaders.

use crate::core::config;
use crate::core::config::limits;
use crate::download::builder::YtDlpArgsBuilder;
use crate::download::error::DownloadFailure;
use crate::download::metadata::{parse_info_json, MediaInfo};
use crate::download::progress::{parse_progress, ProgressSender};
use crate::download::request::DownloadRequest;
use crate::download::ytdlp::run_streaming;
use crate::download::ytdlp_errors::failure_from_output;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;
use tokio::process::Command;

/// Extensions recognized as downloaded media.
pub const MEDIA_EXTENSIONS: [&str; 5] = ["mp4", "mp3", "webm", "mkv", "m4a"];

/// Prefix of per-request work directories.
const WORKDIR_PREFIX: &str = "tubedrop-";

/// Outcome of one download request.
pub type DownloadResult = Result<DownloadedFile, DownloadFailure>;

/// A media file on disk together with the directory that owns it.
///
/// Dropping the value removes the directory; [`DownloadedFile::cleanup`] does
/// the same explicitly and reports errors.
#[derive(Debug)]
pub struct DownloadedFile {
    path: PathBuf,
    size: u64,
    workdir: TempDir,
}

impl DownloadedFile {
    /// Wraps `path` (which must live inside `workdir`).
    pub fn from_workdir(workdir: TempDir, path: PathBuf, size: u64) -> Self {
        Self { path, size, workdir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// File name with extension, e.g. `Some Title.mp4`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string())
    }

    /// File stem, used as the audio title.
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string())
    }

    /// Deletes the file and its work directory.
    pub fn cleanup(self) -> io::Result<()> {
        let dir = self.workdir.path().to_path_buf();
        self.workdir.close()?;
        log::debug!("Removed work directory {}", dir.display());
        Ok(())
    }
}

/// Something that can resolve media info and download media.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Runs the metadata query for `url`.
    async fn fetch_info(&self, url: &str) -> Result<MediaInfo, DownloadFailure>;

    /// Downloads `request`, publishing progress samples on `progress`.
    async fn fetch(&self, request: &DownloadRequest, progress: ProgressSender) -> DownloadResult;
}

/// [`Downloader`] backed by the yt-dlp binary.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    bin: String,
    temp_root: PathBuf,
    max_file_size: u64,
}

impl Default for YtDlpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlpDownloader {
    /// Downloader configured from the environment.
    pub fn new() -> Self {
        Self {
            bin: config::YTDL_BIN.clone(),
            temp_root: PathBuf::from(&*config::TEMP_FILES_DIR),
            max_file_size: limits::MAX_FILE_SIZE,
        }
    }

    pub fn with_binary(mut self, bin: impl Into<String>) -> Self {
        self.bin = bin.into();
        self
    }

    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = root.into();
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn binary(&self) -> &str {
        &self.bin
    }

    async fn create_workdir(&self) -> Result<TempDir, DownloadFailure> {
        tokio::fs::create_dir_all(&self.temp_root)
            .await
            .map_err(|e| DownloadFailure::Spawn(format!("cannot create {}: {}", self.temp_root.display(), e)))?;
        tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(&self.temp_root)
            .map_err(|e| DownloadFailure::Spawn(format!("cannot create work directory: {}", e)))
    }
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    async fn fetch_info(&self, url: &str) -> Result<MediaInfo, DownloadFailure> {
        let args = YtDlpArgsBuilder::for_info(url).build();
        log::debug!("Fetching info for {}", url);

        let output = Command::new(&self.bin)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DownloadFailure::Spawn(format!("{}: {}", self.bin, e)))?;

        if !output.status.success() {
            log::warn!(
                "Info query failed for {} (exit code {:?}): {}",
                url,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(DownloadFailure::InfoUnavailable);
        }

        parse_info_json(&String::from_utf8_lossy(&output.stdout)).map_err(|e| {
            log::warn!("Unparseable info JSON for {}: {}", url, e);
            DownloadFailure::InfoUnavailable
        })
    }

    async fn fetch(&self, request: &DownloadRequest, progress: ProgressSender) -> DownloadResult {
        let workdir = self.create_workdir().await?;
        let args = YtDlpArgsBuilder::for_request(request)
            .output_dir(workdir.path())
            .build();

        log::info!(
            "Downloading {} ({:?}, {}) into {}",
            request.url(),
            request.kind(),
            request.quality(),
            workdir.path().display()
        );

        let run = run_streaming(&self.bin, &args, |line| {
            if let Some(sample) = parse_progress(line) {
                // Receiver may be gone; progress is best effort
                let _ = progress.send(sample);
            }
        })
        .await?;

        if !run.success() {
            let failure = failure_from_output(&run.combined_output(), run.status.code());
            log::warn!(
                "yt-dlp failed for {} [{}]: {}",
                request.url(),
                failure.subcategory(),
                failure
            );
            return Err(failure);
        }

        inspect_output(workdir, self.max_file_size)
    }
}

/// Validates what yt-dlp left in `workdir`.
///
/// Picks the newest media file. Empty and oversized files are rejected and
/// the directory is removed before the failure is returned.
pub fn inspect_output(workdir: TempDir, max_file_size: u64) -> DownloadResult {
    let Some((path, size)) = newest_media_file(workdir.path()) else {
        log::warn!("No media file found in {}", workdir.path().display());
        return Err(DownloadFailure::FileNotFound);
    };

    let rejection = if size == 0 {
        Some(DownloadFailure::EmptyFile)
    } else if size > max_file_size {
        Some(DownloadFailure::TooLarge {
            size,
            limit: max_file_size,
        })
    } else {
        None
    };

    match rejection {
        Some(failure) => {
            log::warn!("Rejecting {}: {}", path.display(), failure);
            if let Err(e) = workdir.close() {
                log::error!("Failed to remove rejected download {}: {}", path.display(), e);
            }
            Err(failure)
        }
        None => {
            log::info!("Downloaded {} ({} bytes)", path.display(), size);
            Ok(DownloadedFile::from_workdir(workdir, path, size))
        }
    }
}

fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MEDIA_EXTENSIONS.iter().any(|m| e.eq_ignore_ascii_case(m)))
        .unwrap_or(false)
}

fn newest_media_file(dir: &Path) -> Option<(PathBuf, u64)> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(Result::ok)
        .filter(|e| is_media_file(&e.path()))
        .filter_map(|e| {
            let meta = e.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            Some((modified, e.path(), meta.len()))
        })
        .max_by_key(|(modified, _, _)| *modified)
        .map(|(_, path, size)| (path, size))
}
