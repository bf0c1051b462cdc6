use anyhow::Result;
use dotenvy::dotenv;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use tubedrop::cli::{Cli, Commands};
use tubedrop::core::utils::{format_duration_long, format_views};
use tubedrop::core::{config, init_logger, log_startup_configuration};
use tubedrop::download::builder::YtDlpArgsBuilder;
use tubedrop::download::metadata::MediaInfo;
use tubedrop::download::progress::parse_progress;
use tubedrop::download::ytdlp::{self as ytdlp, run_streaming};
use tubedrop::download::ytdlp_errors::failure_from_output;
use tubedrop::download::{Downloader, MediaKind, YtDlpDownloader};
use tubedrop::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, SessionCache};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
/// Without a subcommand the bot is started.
///
/// # Errors
/// Returns an error if initialization fails (logging, yt-dlp, bot creation)
/// or if a CLI command fails.
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Log panics instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Download {
            url,
            output,
            max_height,
            audio,
            ffmpeg_location,
        }) => run_cli_download(url, output, max_height, audio, ffmpeg_location).await,
        Some(Commands::Info { url, json }) => run_cli_info(url, json).await,
        Some(Commands::UpdateYtdlp { check }) => run_ytdlp_update(check).await,
    }
}

/// Run yt-dlp update command
async fn run_ytdlp_update(check: bool) -> Result<()> {
    let bin = &*config::YTDL_BIN;
    if !check {
        ytdlp::update_ytdlp(bin).await?;
    }
    let version = ytdlp::ytdlp_version(bin).await?;
    println!("yt-dlp version: {}", version);
    Ok(())
}

/// Run CLI download command
async fn run_cli_download(
    url: String,
    output: String,
    max_height: Option<u32>,
    audio: bool,
    ffmpeg_location: Option<String>,
) -> Result<()> {
    let output_dir = shellexpand::tilde(&output).into_owned();
    let kind = if audio { MediaKind::Audio } else { MediaKind::Video };

    println!("🎬 tubedrop CLI Download");
    println!("========================");
    println!("URL: {}", url);

    if !Path::new(&output_dir).exists() {
        println!("Creating download directory: {}", output_dir);
    }
    tokio::fs::create_dir_all(&output_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", output_dir, e))?;

    // Title and length are informational only
    match YtDlpDownloader::new().fetch_info(&url).await {
        Ok(MediaInfo::Video(info)) => {
            println!("Video Title: {}", info.title);
            if let Some(duration) = info.duration {
                println!("Video Length: {}", format_duration_long(duration));
            }
        }
        Ok(MediaInfo::Playlist(info)) => {
            println!("Playlist: {} (only the first video is downloaded)", info.title);
        }
        Err(e) => log::warn!("Could not fetch info for {}: {}", url, e),
    }

    let args = YtDlpArgsBuilder::for_cli(&url, kind, max_height)
        .output_dir(&output_dir)
        .ffmpeg_location(ffmpeg_location.as_deref())
        .build();

    println!("\n📥 Downloading to '{}'...", output_dir);

    let mut saved_path: Option<String> = None;
    let run = run_streaming(&config::YTDL_BIN, &args, |line| {
        if let Some(progress) = parse_progress(line) {
            print!("\rDownloading: {}%", progress.percent);
            let _ = std::io::stdout().flush();
        } else if !line.starts_with('[') && Path::new(line.trim()).is_file() {
            // Printed by --print after_move:filepath
            saved_path = Some(line.trim().to_string());
        }
    })
    .await
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    if !run.success() {
        let failure = failure_from_output(&run.combined_output(), run.status.code());
        eprintln!("\n\n❌ Download failed!");
        eprintln!("{}", failure.user_message());
        return Err(anyhow::anyhow!("Download failed: {}", failure));
    }

    println!("\n\n✅ Download finished successfully!");
    match saved_path {
        Some(path) => println!("📂 File saved as: {}", path),
        None => println!("📂 Output directory: {}", output_dir),
    }
    Ok(())
}

/// Run CLI info command
async fn run_cli_info(url: String, json: bool) -> Result<()> {
    let info = YtDlpDownloader::new()
        .fetch_info(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get info: {}", e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    match info {
        MediaInfo::Video(v) => {
            println!("🎬 Video Information");
            println!("====================");
            println!("URL: {}\n", url);
            println!("Title: {}", v.title);
            println!("Channel: {}", v.uploader);
            println!(
                "Duration: {}",
                v.duration.map(format_duration_long).unwrap_or_else(|| "Unknown".to_string())
            );
            println!("View count: {}", format_views(v.view_count));
            println!("Upload date: {}", v.upload_date.as_deref().unwrap_or("Unknown"));
        }
        MediaInfo::Playlist(p) => {
            println!("📋 Playlist Information");
            println!("=======================");
            println!("URL: {}\n", url);
            println!("Title: {}", p.title);
            println!("Channel: {}", p.uploader);
            println!("Total videos: {}", p.entry_count);
            for entry in &p.entries {
                println!("  {}. {} ({})", entry.position, entry.title, entry.url);
            }
        }
    }
    Ok(())
}

/// Run the bot with long polling until Ctrl+C
async fn run_bot() -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");

    log_startup_configuration();

    // yt-dlp must work before the bot accepts any request
    let version = ytdlp::ensure_ready(&config::YTDL_BIN).await.map_err(|e| {
        log::error!("yt-dlp is not usable, refusing to start: {}", e);
        e
    })?;
    log::info!("yt-dlp {} is ready", version);

    // Create bot instance
    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(
        Arc::new(YtDlpDownloader::new()),
        Arc::new(SessionCache::with_limit(*config::SESSION_CACHE_LIMIT)),
    );

    log::info!("Bot initialized in {:?}", bot_init_start.elapsed());

    // Create polling listener that drops pending updates on start
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, schema(deps))
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
