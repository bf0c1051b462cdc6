//! Mock implementations of the download and chat seams
//!
//! These let the download flows run end to end without yt-dlp or Telegram.

pub mod mock_downloader;
pub mod recording_sink;

#[allow(unused_imports)]
pub use mock_downloader::{playlist_info, MockDownloader, Scripted};
#[allow(unused_imports)]
pub use recording_sink::{RecordingSink, SinkEvent};
