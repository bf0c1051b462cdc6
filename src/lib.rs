//! tubedrop - Telegram bot and CLI for downloading YouTube videos and audio
//!
//! The heavy lifting is done by an external `yt-dlp` binary; this crate
//! builds its invocations, runs it, validates what it produced and moves the
//! result to a chat or a directory.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging and small helpers
//! - `download`: yt-dlp invocation, execution and output validation
//! - `telegram`: Telegram bot integration and handlers
//! - `cli`: Command-line interface

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod core;
pub mod download;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use download::{DownloadFailure, DownloadRequest, Downloader, YtDlpDownloader};
pub use telegram::{HandlerDeps, SessionCache};
