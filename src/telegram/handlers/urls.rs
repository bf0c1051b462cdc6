//! Incoming URL messages: validate, remember and show the download menu

use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode};

use super::types::{HandlerDeps, HandlerError};
use crate::download::metadata::MediaInfo;
use crate::telegram::menu::{playlist_keyboard, single_video_keyboard};
use crate::telegram::messages;
use crate::telegram::Bot;

/// Substrings accepted as a YouTube link (case-insensitive)
const YOUTUBE_MARKERS: [&str; 3] = ["youtube.com", "youtu.be", "youtube"];

/// Loose YouTube check; yt-dlp does the real validation.
pub fn is_youtube_url(text: &str) -> bool {
    let lower = text.to_lowercase();
    YOUTUBE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Handle a plain text message
pub(super) async fn handle_url_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let url = text.trim();

    if !is_youtube_url(url) {
        bot.send_message(msg.chat.id, messages::INVALID_URL).await?;
        return Ok(());
    }

    let token = deps.sessions.remember(url);
    log::info!("Chat {} sent {} (session {})", msg.chat.id, url, token);

    let status = bot.send_message(msg.chat.id, messages::ANALYZING).await?;

    match deps.downloader.fetch_info(url).await {
        Ok(info) => {
            let keyboard = match &info {
                MediaInfo::Video(_) => single_video_keyboard(&token),
                MediaInfo::Playlist(p) => playlist_keyboard(&token, p.entry_count),
            };
            bot.edit_message_text(msg.chat.id, status.id, messages::info_card(&info))
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }
        Err(failure) => {
            log::warn!("Info query for {} failed: {}", url, failure);
            bot.edit_message_text(msg.chat.id, status.id, failure.user_message())
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_youtube_url() {
        assert!(is_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_youtube_url("HTTPS://M.YOUTUBE.COM/shorts/abc"));
        assert!(!is_youtube_url("https://vimeo.com/123"));
        assert!(!is_youtube_url("hello"));
    }
}
