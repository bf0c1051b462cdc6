//! Configuration constants for the bot

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server URL (local telegram-bot-api)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok().filter(|v| !v.is_empty()));

/// Parent directory for per-request temporary download directories
/// Read from TEMP_FILES_DIR environment variable
/// Defaults to the system temp directory, supports tilde (~) expansion
pub static TEMP_FILES_DIR: Lazy<String> = Lazy::new(|| {
    let raw = env::var("TEMP_FILES_DIR").unwrap_or_else(|_| env::temp_dir().to_string_lossy().into_owned());
    shellexpand::tilde(&raw).into_owned()
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: tubedrop.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "tubedrop.log".to_string()));

/// Optional upper bound on the number of remembered URLs
/// Read from SESSION_CACHE_LIMIT environment variable
/// Unset or 0 keeps the cache unbounded for the lifetime of the process
pub static SESSION_CACHE_LIMIT: Lazy<Option<usize>> = Lazy::new(|| {
    env::var("SESSION_CACHE_LIMIT")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
});

/// Size and fan-out limits
pub mod limits {
    /// Largest file the bot will forward (Telegram Bot API upload cap)
    pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

    /// Number of playlist entries downloaded per request
    pub const PLAYLIST_FANOUT: usize = 3;

    /// Number of playlist entries kept from the info query
    pub const PLAYLIST_PREVIEW: usize = 5;

    /// Characters of unrecognized tool errors shown to the user
    pub const ERROR_SNIPPET_CHARS: usize = 100;

    /// Characters of a title shown on the info card
    pub const TITLE_PREVIEW_CHARS: usize = 60;

    /// Lines of tool output kept for failure classification
    pub const OUTPUT_TAIL_LINES: usize = 200;
}

/// yt-dlp auxiliary call budgets
pub mod ytdlp {
    use super::Duration;

    /// `yt-dlp --version` probe (in seconds)
    pub const VERSION_TIMEOUT_SECS: u64 = 10;

    /// `yt-dlp -U` self-update (in seconds)
    pub const SELF_UPDATE_TIMEOUT_SECS: u64 = 30;

    /// `pip install --upgrade yt-dlp` (in seconds)
    pub const PIP_UPDATE_TIMEOUT_SECS: u64 = 120;

    pub fn version_timeout() -> Duration {
        Duration::from_secs(VERSION_TIMEOUT_SECS)
    }

    pub fn self_update_timeout() -> Duration {
        Duration::from_secs(SELF_UPDATE_TIMEOUT_SECS)
    }

    pub fn pip_update_timeout() -> Duration {
        Duration::from_secs(PIP_UPDATE_TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API requests (in seconds)
    /// Uploads of files close to the size limit take a while on slow links
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Progress reporting configuration
pub mod progress {
    /// Percent step between status message edits
    pub const EDIT_STEP_PERCENT: u8 = 20;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_match_bot_api_cap() {
        assert_eq!(limits::MAX_FILE_SIZE, 52_428_800);
        assert_eq!(limits::PLAYLIST_FANOUT, 3);
        assert!(limits::PLAYLIST_PREVIEW >= limits::PLAYLIST_FANOUT);
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(ytdlp::version_timeout(), Duration::from_secs(10));
        assert!(ytdlp::pip_update_timeout() > ytdlp::self_update_timeout());
        assert_eq!(network::timeout(), Duration::from_secs(300));
    }
}
