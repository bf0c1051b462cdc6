//! Download management: yt-dlp invocation, execution and output validation

pub mod builder;
pub mod error;
pub mod executor;
pub mod metadata;
pub mod playlist;
pub mod progress;
pub mod request;
pub mod ytdlp;
pub mod ytdlp_errors;

// Re-exports for convenience
pub use error::DownloadFailure;
pub use executor::{DownloadResult, DownloadedFile, Downloader, YtDlpDownloader};
pub use metadata::{MediaInfo, PlaylistEntry};
pub use progress::{DownloadProgress, ProgressSender};
pub use request::{DownloadRequest, MediaKind, QualityTier};
