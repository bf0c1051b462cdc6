//! YtDlpDownloader against fake yt-dlp shell scripts

#![cfg(unix)]

use pretty_assertions::assert_eq;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tubedrop::download::progress::discard_progress;
use tubedrop::download::{DownloadFailure, DownloadRequest, Downloader, MediaInfo, QualityTier, YtDlpDownloader};

const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Shell prelude that finds the directory of the `-o` template
const FIND_OUTPUT_DIR: &str = r#"out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  prev="$arg"
done
dir=$(dirname "$out")"#;

struct Fixture {
    _scripts: TempDir,
    temp_root: TempDir,
    downloader: YtDlpDownloader,
}

impl Fixture {
    fn new(body: &str) -> Self {
        let scripts = tempfile::tempdir().unwrap();
        let path = scripts.path().join("yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        let temp_root = tempfile::tempdir().unwrap();
        let downloader = YtDlpDownloader::new()
            .with_binary(path.to_string_lossy().into_owned())
            .with_temp_root(temp_root.path());
        Self {
            _scripts: scripts,
            temp_root,
            downloader,
        }
    }

    /// Script that writes `size` zero bytes as `name`
    fn writing(name: &str, size: usize) -> Self {
        Self::new(&format!(
            "{}\necho \"[download]  50.0% of 1.00KiB at 1.00KiB/s ETA 00:01\"\nhead -c {} /dev/zero > \"$dir/{}\"\necho \"[download] 100% of 1.00KiB\"",
            FIND_OUTPUT_DIR, size, name
        ))
    }

    fn leftover_dirs(&self) -> usize {
        std::fs::read_dir(self.temp_root.path()).unwrap().count()
    }
}

fn video_request() -> DownloadRequest {
    DownloadRequest::video(URL, QualityTier::Best)
}

#[tokio::test]
async fn test_download_success_with_progress() {
    let fixture = Fixture::writing("Fake Video.mp4", 1000);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let file = fixture.downloader.fetch(&video_request(), tx).await.unwrap();

    assert_eq!(file.file_name(), "Fake Video.mp4");
    assert_eq!(file.size(), 1000);
    assert!(file.workdir().starts_with(fixture.temp_root.path()));
    let dir_name = file.workdir().file_name().unwrap().to_string_lossy().into_owned();
    assert!(dir_name.starts_with("tubedrop-"), "{}", dir_name);

    let first = rx.try_recv().unwrap();
    assert_eq!(first.percent, 50);
    assert_eq!(rx.try_recv().unwrap().percent, 100);

    file.cleanup().unwrap();
    assert_eq!(fixture.leftover_dirs(), 0);
}

#[tokio::test]
async fn test_non_utf8_output_does_not_break_download() {
    let fixture = Fixture::new(&format!(
        r#"{}
printf '[download] Destination: caf\351.mp4\n'
i=0; while [ $i -lt 20000 ]; do echo "[download]  50.0% of 1.00KiB at 1.00KiB/s ETA 00:01"; i=$((i+1)); done
head -c 1000 /dev/zero > "$dir/video.mp4""#,
        FIND_OUTPUT_DIR
    ));

    let file = fixture.downloader.fetch(&video_request(), discard_progress()).await.unwrap();

    assert_eq!(file.file_name(), "video.mp4");
    assert_eq!(file.size(), 1000);
    file.cleanup().unwrap();
}

#[tokio::test]
async fn test_oversized_output_is_deleted() {
    let mut fixture = Fixture::writing("Big.mp4", 1000);
    fixture.downloader = fixture.downloader.clone().with_max_file_size(100);

    let err = fixture.downloader.fetch(&video_request(), discard_progress()).await.unwrap_err();

    assert_eq!(err, DownloadFailure::TooLarge { size: 1000, limit: 100 });
    assert_eq!(fixture.leftover_dirs(), 0);
}

#[tokio::test]
async fn test_empty_output_is_deleted() {
    let fixture = Fixture::writing("Empty.mp4", 0);

    let err = fixture.downloader.fetch(&video_request(), discard_progress()).await.unwrap_err();

    assert_eq!(err, DownloadFailure::EmptyFile);
    assert_eq!(fixture.leftover_dirs(), 0);
}

#[tokio::test]
async fn test_clean_exit_without_file() {
    let fixture = Fixture::new("echo '[download] nothing to do'");

    let err = fixture.downloader.fetch(&video_request(), discard_progress()).await.unwrap_err();

    assert_eq!(err, DownloadFailure::FileNotFound);
    assert_eq!(fixture.leftover_dirs(), 0);
}

#[tokio::test]
async fn test_private_video_is_classified() {
    let fixture = Fixture::new("echo 'ERROR: [youtube] dQw4w9WgXcQ: Private video. Sign in if granted access' 1>&2\nexit 1");

    let err = fixture.downloader.fetch(&video_request(), discard_progress()).await.unwrap_err();

    assert_eq!(err, DownloadFailure::Private);
    assert_eq!(fixture.leftover_dirs(), 0);
}

#[tokio::test]
async fn test_silent_nonzero_exit_is_a_failure() {
    // A file is left behind but the exit code wins
    let fixture = Fixture::new(&format!("{}\nhead -c 10 /dev/zero > \"$dir/x.mp4\"\nexit 2", FIND_OUTPUT_DIR));

    let err = fixture.downloader.fetch(&video_request(), discard_progress()).await.unwrap_err();

    assert_eq!(err, DownloadFailure::Tool("yt-dlp exited with status 2".to_string()));
    assert_eq!(fixture.leftover_dirs(), 0);
}

#[tokio::test]
async fn test_missing_binary() {
    let temp_root = tempfile::tempdir().unwrap();
    let downloader = YtDlpDownloader::new()
        .with_binary("/nonexistent/yt-dlp")
        .with_temp_root(temp_root.path());

    let err = downloader.fetch(&video_request(), discard_progress()).await.unwrap_err();

    assert!(matches!(err, DownloadFailure::Spawn(_)));
}

#[tokio::test]
async fn test_fetch_info_parses_json() {
    let fixture = Fixture::new(
        r#"if [ "$1" = "-J" ]; then
  echo '{"id": "dQw4w9WgXcQ", "title": "Never Gonna Give You Up", "uploader": "Rick Astley", "duration": 213}'
  exit 0
fi
exit 1"#,
    );

    let info = fixture.downloader.fetch_info(URL).await.unwrap();

    let MediaInfo::Video(video) = info else {
        panic!("expected a video");
    };
    assert_eq!(video.title, "Never Gonna Give You Up");
    assert_eq!(video.duration, Some(213));
}

#[tokio::test]
async fn test_fetch_info_failure() {
    let fixture = Fixture::new("echo 'ERROR: Video unavailable' 1>&2\nexit 1");
    assert_eq!(fixture.downloader.fetch_info(URL).await.unwrap_err(), DownloadFailure::InfoUnavailable);
}

#[tokio::test]
async fn test_fetch_info_garbage_output() {
    let fixture = Fixture::new("echo 'not json'");
    assert_eq!(fixture.downloader.fetch_info(URL).await.unwrap_err(), DownloadFailure::InfoUnavailable);
}

#[test]
fn test_fixture_script_is_executable() {
    let fixture = Fixture::new("exit 0");
    let bin = fixture.downloader.binary();
    let mode = std::fs::metadata(Path::new(bin)).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0o111);
}
