use crate::core::config::limits;
use crate::core::utils::{format_mib, truncate_with_ellipsis};
use thiserror::Error;

/// Request-level download failure.
///
/// These are reported to the user and never abort the bot. Each variant maps
/// to one user-facing message via [`DownloadFailure::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadFailure {
    /// HTTP 403 from the media host
    #[error("video is restricted (HTTP 403)")]
    Restricted,
    #[error("video is private")]
    Private,
    #[error("video is unavailable")]
    Unavailable,
    #[error("video requires age verification")]
    AgeRestricted,
    /// Output exceeded the upload limit; the file has been deleted
    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
    /// yt-dlp produced a zero-byte file; it has been deleted
    #[error("downloaded file is empty")]
    EmptyFile,
    /// yt-dlp exited cleanly but left no media file behind
    #[error("downloaded file not found")]
    FileNotFound,
    /// Unrecognized yt-dlp error output (or a bare non-zero exit)
    #[error("yt-dlp failed: {0}")]
    Tool(String),
    /// yt-dlp could not be started or the work directory could not be created
    #[error("failed to run yt-dlp: {0}")]
    Spawn(String),
    /// The metadata query failed or returned nothing usable
    #[error("could not retrieve media information")]
    InfoUnavailable,
}

impl DownloadFailure {
    /// Text shown to the chat user.
    pub fn user_message(&self) -> String {
        match self {
            DownloadFailure::Restricted => "❌ Video is restricted or unavailable. Try another video.".to_string(),
            DownloadFailure::Private => "❌ This video is private.".to_string(),
            DownloadFailure::Unavailable => "❌ Video is unavailable.".to_string(),
            DownloadFailure::AgeRestricted => "❌ Video requires age verification.".to_string(),
            DownloadFailure::TooLarge { size, limit } => format!(
                "❌ File too large ({}MB > {:.0}MB). Try lower quality.",
                format_mib(*size),
                *limit as f64 / (1024.0 * 1024.0)
            ),
            DownloadFailure::EmptyFile => "❌ Downloaded file is empty.".to_string(),
            DownloadFailure::FileNotFound => "❌ Download completed but file not found.".to_string(),
            DownloadFailure::Tool(msg) => format!(
                "❌ Download failed: {}",
                truncate_with_ellipsis(msg, limits::ERROR_SNIPPET_CHARS)
            ),
            DownloadFailure::Spawn(msg) => format!(
                "❌ Unexpected error: {}",
                truncate_with_ellipsis(msg, limits::ERROR_SNIPPET_CHARS)
            ),
            DownloadFailure::InfoUnavailable => "❌ Could not retrieve video information. The video might be:\n\
                • Private or restricted\n\
                • Unavailable in your region\n\
                • Deleted\n\
                • Age-restricted\n\
                \n\
                Please try another video."
                .to_string(),
        }
    }

    /// Short category name for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadFailure::Restricted => "restricted",
            DownloadFailure::Private => "private",
            DownloadFailure::Unavailable => "unavailable",
            DownloadFailure::AgeRestricted => "age_restricted",
            DownloadFailure::TooLarge { .. } => "too_large",
            DownloadFailure::EmptyFile => "empty_file",
            DownloadFailure::FileNotFound => "file_not_found",
            DownloadFailure::Tool(_) => "tool",
            DownloadFailure::Spawn(_) => "spawn",
            DownloadFailure::InfoUnavailable => "info_unavailable",
        }
    }
}
