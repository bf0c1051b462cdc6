use thiserror::Error;

/// Centralized error types for the application
///
/// Request-level download failures have their own type
/// ([`crate::download::DownloadFailure`]) because they are reported to the
/// user instead of being propagated. Everything that can abort a handler or
/// the process ends up here.
///
/// # Example
///
/// ```no_run
/// use tubedrop::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Download/yt-dlp errors
    #[error("Download error: {0}")]
    Download(String),

    /// yt-dlp is missing or does not run
    #[error("yt-dlp is not available: {0}")]
    ToolUnavailable(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (yt-dlp -J output) errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Helper function to convert String to AppError::Download
impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Download(err)
    }
}

/// Helper function to convert &str to AppError::Download
impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Download(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AppError::ToolUnavailable("not found".into());
        assert_eq!(err.to_string(), "yt-dlp is not available: not found");
    }

    #[test]
    fn test_from_str_is_download() {
        let err: AppError = "boom".into();
        assert!(matches!(err, AppError::Download(ref m) if m == "boom"));
    }

    #[test]
    fn test_from_io() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
