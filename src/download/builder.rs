//! Builder for yt-dlp argument lists.
//!
//! Maps a [`DownloadRequest`] (or an info / CLI query) onto the ordered
//! argument vector passed to yt-dlp. Pure: nothing here touches the network
//! or the filesystem.

use crate::download::request::{DownloadRequest, MediaKind, QualityTier};
use std::path::Path;

/// Desktop browser User-Agent sent with every request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Extractor arguments that avoid most web-client restrictions.
pub const YOUTUBE_EXTRACTOR_ARGS: &str = "youtube:player_client=android,web;player_skip=configs";

/// Output file name template inside the per-request directory.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Output file name template for CLI downloads into a user directory.
pub const CLI_OUTPUT_TEMPLATE: &str = "%(title)s [%(id)s].%(ext)s";

/// Audio format selector; the postprocessor converts the result to mp3.
pub const AUDIO_FORMAT: &str = "bestaudio/best";

/// Target codec and bitrate for audio extraction.
pub const AUDIO_CODEC: &str = "mp3";
pub const AUDIO_QUALITY: &str = "192K";

/// Returns the format selector for a video quality tier.
///
/// Prefers a single progressive file under the upload limit, then a merged
/// video+audio pair, then whatever is best within the height bound.
pub fn format_selector(tier: QualityTier) -> String {
    match tier.max_height() {
        Some(h) => format!(
            "best[height<={h}][filesize<?50M]/bestvideo[height<={h}]+bestaudio/best[height<={h}]",
            h = h
        ),
        None => "best[filesize<?50M]/bestvideo+bestaudio/best".to_string(),
    }
}

/// Returns the progressive-stream selector used by the CLI.
///
/// Progressive streams carry audio and video together, so no merge step is
/// needed. MP4 is preferred, then any container, then yt-dlp's default.
pub fn progressive_selector(max_height: Option<u32>) -> String {
    let bound = max_height.map(|h| format!("[height<={}]", h)).unwrap_or_default();
    format!(
        "best[ext=mp4][vcodec!=none][acodec!=none]{b}/best[vcodec!=none][acodec!=none]{b}/best",
        b = bound
    )
}

/// Fluent builder for yt-dlp invocations.
///
/// # Example
///
/// ```
/// use tubedrop::download::builder::YtDlpArgsBuilder;
/// use tubedrop::download::request::{DownloadRequest, QualityTier};
///
/// let request = DownloadRequest::video("https://youtu.be/dQw4w9WgXcQ", QualityTier::High);
/// let args = YtDlpArgsBuilder::for_request(&request)
///     .output_dir("/tmp/tubedrop-abc")
///     .build();
/// assert!(args.iter().any(|a| a.contains("height<=720")));
/// assert_eq!(args.last().map(String::as_str), Some("https://youtu.be/dQw4w9WgXcQ"));
/// ```
#[derive(Debug, Clone)]
pub struct YtDlpArgsBuilder {
    url: String,
    mode: Mode,
    output_dir: Option<String>,
    ffmpeg_location: Option<String>,
}

#[derive(Debug, Clone)]
enum Mode {
    Download { kind: MediaKind, quality: QualityTier, playlist: bool },
    Info,
    Cli { kind: MediaKind, max_height: Option<u32> },
}

impl YtDlpArgsBuilder {
    /// Arguments for a bot download into a private directory.
    pub fn for_request(request: &DownloadRequest) -> Self {
        Self {
            url: request.url().to_string(),
            mode: Mode::Download {
                kind: request.kind(),
                quality: request.quality(),
                playlist: request.is_playlist(),
            },
            output_dir: None,
            ffmpeg_location: None,
        }
    }

    /// Arguments for a `-J` metadata query. Playlists are listed flat.
    pub fn for_info(url: &str) -> Self {
        Self {
            url: url.to_string(),
            mode: Mode::Info,
            output_dir: None,
            ffmpeg_location: None,
        }
    }

    /// Arguments for a CLI download straight into a destination directory.
    pub fn for_cli(url: &str, kind: MediaKind, max_height: Option<u32>) -> Self {
        Self {
            url: url.to_string(),
            mode: Mode::Cli { kind, max_height },
            output_dir: None,
            ffmpeg_location: None,
        }
    }

    /// Directory the output template is rooted at.
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Explicit ffmpeg location (`--ffmpeg-location`).
    pub fn ffmpeg_location(mut self, path: Option<&str>) -> Self {
        self.ffmpeg_location = path.map(str::to_string);
        self
    }

    /// Builds the ordered argument list. The URL is always last.
    pub fn build(self) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();

        match self.mode {
            Mode::Info => {
                push(&mut args, &["-J", "--no-warnings", "--skip-download", "--flat-playlist"]);
                push_common(&mut args);
            }
            Mode::Download { kind, quality, playlist } => {
                let template = join_template(self.output_dir.as_deref(), OUTPUT_TEMPLATE);
                args.push("-o".to_string());
                args.push(template);
                push(&mut args, &["--newline", "--no-write-subs", "--no-write-auto-subs"]);
                if !playlist {
                    args.push("--no-playlist".to_string());
                }
                push_common(&mut args);
                push_format(&mut args, kind, &format_selector(quality));
            }
            Mode::Cli { kind, max_height } => {
                let template = join_template(self.output_dir.as_deref(), CLI_OUTPUT_TEMPLATE);
                args.push("-o".to_string());
                args.push(template);
                // Print the final path after post-processing; keep progress visible
                push(
                    &mut args,
                    &["--newline", "--progress", "--print", "after_move:filepath", "--no-playlist"],
                );
                push_common(&mut args);
                let selector = progressive_selector(max_height);
                push_format(&mut args, kind, &selector);
            }
        }

        if let Some(ffmpeg) = self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(ffmpeg);
        }

        args.push(self.url);
        args
    }
}

fn push(args: &mut Vec<String>, items: &[&str]) {
    args.extend(items.iter().map(|s| s.to_string()));
}

fn push_common(args: &mut Vec<String>) {
    push(
        args,
        &[
            "--no-check-certificates",
            "--extractor-args",
            YOUTUBE_EXTRACTOR_ARGS,
            "--user-agent",
            USER_AGENT,
        ],
    );
}

fn push_format(args: &mut Vec<String>, kind: MediaKind, video_selector: &str) {
    match kind {
        MediaKind::Audio => push(
            args,
            &[
                "-f",
                AUDIO_FORMAT,
                "-x",
                "--audio-format",
                AUDIO_CODEC,
                "--audio-quality",
                AUDIO_QUALITY,
            ],
        ),
        MediaKind::Video => {
            args.push("-f".to_string());
            args.push(video_selector.to_string());
            push(args, &["--merge-output-format", "mp4"]);
        }
    }
}

fn join_template(dir: Option<&str>, template: &str) -> String {
    match dir {
        Some(dir) => Path::new(dir).join(template).to_string_lossy().into_owned(),
        None => template.to_string(),
    }
}
