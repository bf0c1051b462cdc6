//! User-facing texts. Everything sent with HTML parse mode goes through
//! [`escape`] first.

use crate::core::config::limits;
use crate::core::utils::{format_duration, format_mib, format_views, truncate_with_ellipsis};
use crate::download::metadata::{MediaInfo, PlaylistInfo, VideoInfo};
use teloxide::utils::html::escape;

pub const WELCOME: &str = concat!(
    "🎥 <b>Welcome to YouTube Downloader Bot!</b>\n\n",
    "📝 <b>How to use:</b>\n",
    "1. Send me a YouTube URL\n",
    "2. Choose your preferred format\n",
    "3. Wait for download to complete\n\n",
    "🎯 <b>Supported:</b>\n",
    "• Single videos\n",
    "• Playlists (first 3 videos)\n",
    "• Audio extraction (MP3)\n",
    "• Multiple quality options\n\n",
    "⚠️ <b>Limitations:</b>\n",
    "• Max file size: 50MB\n",
    "• Some videos may be restricted\n",
    "• Processing time: 1-3 minutes\n\n",
    "Just send me a YouTube URL to get started! 🚀",
);

pub const HELP: &str = concat!(
    "🔧 <b>Bot Commands:</b>\n\n",
    "/start - Welcome message\n",
    "/help - Show this help\n\n",
    "🎬 <b>Download Options:</b>\n",
    "• <b>Best Quality</b> - Highest available quality\n",
    "• <b>High Quality</b> - 720p maximum\n",
    "• <b>Medium Quality</b> - 480p maximum\n",
    "• <b>Audio Only</b> - MP3 format\n\n",
    "📋 <b>Playlist Support:</b>\n",
    "• Downloads first 3 videos automatically\n",
    "• Each video processed separately\n",
    "• Audio-only option available\n\n",
    "⚠️ <b>Important Notes:</b>\n",
    "• Maximum file size: 50MB per file\n",
    "• Some videos may be geo-restricted\n",
    "• Private videos cannot be downloaded\n",
    "• Processing may take a few minutes\n\n",
    "🆘 <b>Troubleshooting:</b>\n",
    "If a video fails to download, try:\n",
    "1. Different quality option\n",
    "2. Another video\n",
    "3. Check if video is public",
);

pub const INVALID_URL: &str = "❌ Please send a valid YouTube URL.";
pub const ANALYZING: &str = "🔍 Analyzing URL... Please wait.";
pub const INVALID_SELECTION: &str = "❌ Invalid selection.";
pub const SESSION_EXPIRED: &str = "❌ Session expired. Please send the URL again.";
pub const STARTING_DOWNLOAD: &str = "⬇️ Starting download... This may take 1-3 minutes.";
pub const DOWNLOAD_COMPLETED: &str = "✅ Download completed successfully!";
pub const SEND_FAILED: &str = "❌ Failed to send file. It might be too large.";
pub const PLAYLIST_STARTED: &str = "📋 Processing playlist... Downloading first 3 videos.";
pub const PLAYLIST_UNAVAILABLE: &str = "❌ Could not process playlist.";
pub const PLAYLIST_ALL_FAILED: &str = "❌ All playlist downloads failed.";
pub const AUDIO_CAPTION: &str = "🎵 Downloaded audio";
pub const VIDEO_CAPTION: &str = "🎬 Downloaded video";

/// Characters of a file name shown in the upload status
const UPLOAD_NAME_CHARS: usize = 30;

/// Characters of an entry title shown in the playlist status
const ENTRY_TITLE_CHARS: usize = 50;

pub fn progress(percent: u8) -> String {
    format!("⬇️ Downloading... {}%", percent)
}

pub fn uploading(file_name: &str, size: u64) -> String {
    format!(
        "📤 Uploading {} ({}MB)",
        truncate_with_ellipsis(file_name, UPLOAD_NAME_CHARS),
        format_mib(size)
    )
}

pub fn playlist_entry_progress(position: usize, total: usize, title: &str) -> String {
    format!(
        "⬇️ Downloading {}/{}: {}",
        position,
        total,
        truncate_with_ellipsis(title, ENTRY_TITLE_CHARS)
    )
}

pub fn playlist_entry_failed(title: &str, reason: &str) -> String {
    format!("❌ Failed to download '{}': {}", title, reason)
}

pub fn playlist_completed(delivered: usize, attempted: usize) -> String {
    format!(
        "✅ Playlist download completed! Successfully downloaded {}/{} videos.",
        delivered, attempted
    )
}

fn card_title(title: &str) -> String {
    escape(&truncate_with_ellipsis(title, limits::TITLE_PREVIEW_CHARS))
}

fn video_card(info: &VideoInfo) -> String {
    format!(
        "🎬 <b>Video Information</b>\n\n\
         📋 <b>Title:</b> {}\n\
         👤 <b>Channel:</b> {}\n\
         ⏱️ <b>Duration:</b> {}\n\
         👁️ <b>Views:</b> {}\n\n\
         Choose download quality:",
        card_title(&info.title),
        escape(&info.uploader),
        format_duration(info.duration),
        format_views(info.view_count),
    )
}

fn playlist_card(info: &PlaylistInfo) -> String {
    format!(
        "🎬 <b>Playlist Information</b>\n\n\
         📋 <b>Title:</b> {}\n\
         👤 <b>Channel:</b> {}\n\
         📊 <b>Total Videos:</b> {}\n\n\
         ⚠️ <b>Note:</b> Due to size limits, only first {} videos will be downloaded.\n\n\
         Choose download option:",
        card_title(&info.title),
        escape(&info.uploader),
        info.entry_count,
        limits::PLAYLIST_FANOUT,
    )
}

/// Info card shown above the download menu.
pub fn info_card(info: &MediaInfo) -> String {
    match info {
        MediaInfo::Video(v) => video_card(v),
        MediaInfo::Playlist(p) => playlist_card(p),
    }
}
