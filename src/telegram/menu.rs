//! Inline keyboards and their callback payloads.
//!
//! Payload layout:
//! - `dl:v:<tier>:<token>` single video at a quality tier
//! - `dl:a:<token>` single audio
//! - `pl:v:<token>` / `pl:a:<token>` first playlist entries as video / audio

use crate::core::config::limits;
use crate::download::request::{MediaKind, QualityTier};
use crate::telegram::cache::SessionToken;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Telegram's limit on callback data
pub const MAX_CALLBACK_BYTES: usize = 64;

/// A button press decoded from its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Single {
        kind: MediaKind,
        quality: QualityTier,
        token: SessionToken,
    },
    Playlist {
        kind: MediaKind,
        token: SessionToken,
    },
}

impl MenuAction {
    pub fn video(quality: QualityTier, token: SessionToken) -> Self {
        MenuAction::Single {
            kind: MediaKind::Video,
            quality,
            token,
        }
    }

    pub fn audio(token: SessionToken) -> Self {
        MenuAction::Single {
            kind: MediaKind::Audio,
            quality: QualityTier::Best,
            token,
        }
    }

    pub fn token(&self) -> &SessionToken {
        match self {
            MenuAction::Single { token, .. } | MenuAction::Playlist { token, .. } => token,
        }
    }

    pub fn encode(&self) -> String {
        match self {
            MenuAction::Single {
                kind: MediaKind::Video,
                quality,
                token,
            } => format!("dl:v:{}:{}", quality.label(), token),
            MenuAction::Single {
                kind: MediaKind::Audio,
                token,
                ..
            } => format!("dl:a:{}", token),
            MenuAction::Playlist { kind, token } => format!("pl:{}:{}", kind_code(*kind), token),
        }
    }

    /// Decodes a payload. Returns `None` for anything malformed.
    pub fn parse(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split(':').collect();
        match parts.as_slice() {
            ["dl", "v", tier, token] => Some(MenuAction::video(
                QualityTier::from_label(tier),
                SessionToken::parse(token)?,
            )),
            ["dl", "a", token] => Some(MenuAction::audio(SessionToken::parse(token)?)),
            ["pl", kind, token] => Some(MenuAction::Playlist {
                kind: parse_kind_code(kind)?,
                token: SessionToken::parse(token)?,
            }),
            _ => None,
        }
    }
}

fn kind_code(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "v",
        MediaKind::Audio => "a",
    }
}

fn parse_kind_code(code: &str) -> Option<MediaKind> {
    match code {
        "v" => Some(MediaKind::Video),
        "a" => Some(MediaKind::Audio),
        _ => None,
    }
}

fn button(label: impl Into<String>, action: MenuAction) -> Vec<InlineKeyboardButton> {
    vec![InlineKeyboardButton::callback(label, action.encode())]
}

/// Quality menu for a single video
pub fn single_video_keyboard(token: &SessionToken) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        button("📹 Best Quality", MenuAction::video(QualityTier::Best, token.clone())),
        button("📹 High (720p)", MenuAction::video(QualityTier::High, token.clone())),
        button("📹 Medium (480p)", MenuAction::video(QualityTier::Medium, token.clone())),
        button("🎵 Audio Only", MenuAction::audio(token.clone())),
    ])
}

/// Menu for a playlist of `entry_count` videos
pub fn playlist_keyboard(token: &SessionToken, entry_count: usize) -> InlineKeyboardMarkup {
    let fanout = limits::PLAYLIST_FANOUT;
    InlineKeyboardMarkup::new(vec![
        button(
            format!("📹 Download Videos (First {} of {})", fanout, entry_count),
            MenuAction::Playlist {
                kind: MediaKind::Video,
                token: token.clone(),
            },
        ),
        button(
            format!("🎵 Download Audio (First {} of {})", fanout, entry_count),
            MenuAction::Playlist {
                kind: MediaKind::Audio,
                token: token.clone(),
            },
        ),
    ])
}
