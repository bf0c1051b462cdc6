//! Media metadata from `yt-dlp -J`.
//!
//! Only the fields needed for the info card and for playlist fan-out are
//! read; everything else in the JSON is ignored.

use crate::core::config::limits;
use serde::{Deserialize, Serialize};

/// Metadata of a single video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub uploader: String,
    /// Duration in seconds
    pub duration: Option<u64>,
    pub view_count: Option<u64>,
    /// `YYYYMMDD` as reported by yt-dlp
    pub upload_date: Option<String>,
}

/// Single entry in a playlist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistEntry {
    /// Video URL
    pub url: String,
    /// Video title
    pub title: String,
    /// Video position in playlist (1-indexed)
    pub position: usize,
}

/// Playlist metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistInfo {
    pub title: String,
    pub uploader: String,
    /// Number of non-null entries in the playlist
    pub entry_count: usize,
    /// First entries of the playlist (at most `limits::PLAYLIST_PREVIEW`)
    pub entries: Vec<PlaylistEntry>,
}

/// Result of an info query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaInfo {
    Video(VideoInfo),
    Playlist(PlaylistInfo),
}

impl MediaInfo {
    pub fn is_playlist(&self) -> bool {
        matches!(self, MediaInfo::Playlist(_))
    }

    pub fn title(&self) -> &str {
        match self {
            MediaInfo::Video(v) => &v.title,
            MediaInfo::Playlist(p) => &p.title,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(rename = "_type", default)]
    kind: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    upload_date: Option<String>,
    #[serde(default)]
    entries: Option<Vec<Option<RawEntry>>>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Parses yt-dlp `-J` output.
pub fn parse_info_json(json: &str) -> Result<MediaInfo, serde_json::Error> {
    let raw: RawInfo = serde_json::from_str(json)?;
    let uploader = raw
        .uploader
        .or(raw.channel)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    if raw.kind.as_deref() == Some("playlist") {
        let valid: Vec<RawEntry> = raw.entries.unwrap_or_default().into_iter().flatten().collect();
        let entry_count = valid.len();
        let entries = valid
            .into_iter()
            .filter_map(entry_url_and_title)
            .take(limits::PLAYLIST_PREVIEW)
            .enumerate()
            .map(|(i, (url, title))| PlaylistEntry {
                url,
                title: title.unwrap_or_else(|| format!("Video {}", i + 1)),
                position: i + 1,
            })
            .collect();

        return Ok(MediaInfo::Playlist(PlaylistInfo {
            title: raw.title.unwrap_or_else(|| "Unknown Playlist".to_string()),
            uploader,
            entry_count,
            entries,
        }));
    }

    Ok(MediaInfo::Video(VideoInfo {
        id: raw.id.unwrap_or_default(),
        title: raw.title.unwrap_or_else(|| "Unknown".to_string()),
        uploader,
        duration: raw.duration.filter(|d| *d > 0.0).map(|d| d as u64),
        view_count: raw.view_count,
        upload_date: raw.upload_date,
    }))
}

/// Entries without a URL fall back to the watch URL built from the id.
fn entry_url_and_title(entry: RawEntry) -> Option<(String, Option<String>)> {
    let url = match (entry.url.filter(|u| !u.is_empty()), entry.id) {
        (Some(url), _) => url,
        (None, Some(id)) => format!("https://youtube.com/watch?v={}", id),
        (None, None) => return None,
    };
    Some((url, entry.title))
}
