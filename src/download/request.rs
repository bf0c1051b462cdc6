//! Download request model shared by the bot and the CLI.

use std::fmt;

/// What the user wants out of the source: the muxed video or an mp3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn is_audio(self) -> bool {
        matches!(self, MediaKind::Audio)
    }
}

/// Video quality tiers offered in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityTier {
    /// Highest available quality
    #[default]
    Best,
    /// 720p maximum
    High,
    /// 480p maximum
    Medium,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [QualityTier::Best, QualityTier::High, QualityTier::Medium];

    /// Parses a tier label. Unknown labels fall back to [`QualityTier::Best`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" | "720" | "720p" => QualityTier::High,
            "medium" | "med" | "480" | "480p" => QualityTier::Medium,
            _ => QualityTier::Best,
        }
    }

    /// Stable label used in callback payloads and logs.
    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Best => "best",
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
        }
    }

    /// Height bound of the tier, `None` for unbounded.
    pub fn max_height(self) -> Option<u32> {
        match self {
            QualityTier::Best => None,
            QualityTier::High => Some(720),
            QualityTier::Medium => Some(480),
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single user-initiated download.
///
/// Immutable once constructed; build a new one per user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: String,
    kind: MediaKind,
    quality: QualityTier,
    playlist: bool,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, kind: MediaKind, quality: QualityTier, playlist: bool) -> Self {
        // Audio is always extracted from the best stream
        let quality = if kind.is_audio() { QualityTier::Best } else { quality };
        Self {
            url: url.into(),
            kind,
            quality,
            playlist,
        }
    }

    pub fn video(url: impl Into<String>, quality: QualityTier) -> Self {
        Self::new(url, MediaKind::Video, quality, false)
    }

    pub fn audio(url: impl Into<String>) -> Self {
        Self::new(url, MediaKind::Audio, QualityTier::Best, false)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn quality(&self) -> QualityTier {
        self.quality
    }

    pub fn is_playlist(&self) -> bool {
        self.playlist
    }
}
