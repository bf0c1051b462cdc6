//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Startup diagnostics of the effective configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Masks a bot token for logging, keeping the numeric bot id.
///
/// `123456:ABCDEF...` becomes `123456:***`.
pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return "<not set>".to_string();
    }
    match token.split_once(':') {
        Some((id, _)) => format!("{}:***", id),
        None => "***".to_string(),
    }
}

/// Logs the effective configuration at application startup
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("⚙️  Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("BOT_TOKEN: {}", mask_token(&config::BOT_TOKEN));
    match config::BOT_API_URL.as_deref() {
        Some(url) => log::info!("BOT_API_URL: {}", url),
        None => log::info!("BOT_API_URL: default (api.telegram.org)"),
    }
    log::info!("YTDL_BIN: {}", *config::YTDL_BIN);
    log::info!("TEMP_FILES_DIR: {}", *config::TEMP_FILES_DIR);
    match *config::SESSION_CACHE_LIMIT {
        Some(limit) => log::info!("SESSION_CACHE_LIMIT: {}", limit),
        None => log::info!("SESSION_CACHE_LIMIT: unbounded"),
    }
    log::info!(
        "Max file size: {:.0} MiB, playlist fan-out: {}",
        config::limits::MAX_FILE_SIZE as f64 / (1024.0 * 1024.0),
        config::limits::PLAYLIST_FANOUT
    );
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
