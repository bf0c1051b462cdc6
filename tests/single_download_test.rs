//! Single download flow: progress, delivery, rejection and cleanup

mod mocks;

use mocks::{MockDownloader, RecordingSink, Scripted, SinkEvent};
use pretty_assertions::assert_eq;
use tubedrop::download::{DownloadFailure, DownloadRequest, MediaKind, QualityTier};
use tubedrop::telegram::downloads::download_single;
use tubedrop::telegram::messages;

const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

#[tokio::test]
async fn test_successful_video_is_sent_then_removed() {
    let downloader = MockDownloader::new().with_outcome(URL, Scripted::file("Never Gonna.mp4", 3 * 1024 * 1024));
    let sink = RecordingSink::new();

    let delivered = download_single(&downloader, &sink, DownloadRequest::video(URL, QualityTier::High)).await;

    assert!(delivered);
    assert_eq!(
        sink.statuses(),
        vec![
            messages::STARTING_DOWNLOAD.to_string(),
            "⬇️ Downloading... 40%".to_string(),
            "⬇️ Downloading... 80%".to_string(),
            "⬇️ Downloading... 100%".to_string(),
            "📤 Uploading Never Gonna.mp4 (3.0MB)".to_string(),
            messages::DOWNLOAD_COMPLETED.to_string(),
        ]
    );

    let files = sink.files();
    assert_eq!(files.len(), 1);
    let SinkEvent::File { kind, existed, workdir, .. } = &files[0] else {
        panic!("expected a file event");
    };
    assert_eq!(*kind, MediaKind::Video);
    assert!(*existed);
    assert!(!workdir.exists());
    assert_eq!(downloader.requests()[0].quality(), QualityTier::High);
}

#[tokio::test]
async fn test_audio_is_sent_as_audio() {
    let downloader = MockDownloader::new().with_outcome(URL, Scripted::file("Never Gonna.mp3", 1024));
    let sink = RecordingSink::new();

    assert!(download_single(&downloader, &sink, DownloadRequest::audio(URL)).await);

    let SinkEvent::File { kind, .. } = &sink.files()[0] else {
        panic!("expected a file event");
    };
    assert_eq!(*kind, MediaKind::Audio);
}

#[tokio::test]
async fn test_zero_byte_file_is_never_forwarded() {
    let downloader = MockDownloader::new().with_outcome(URL, Scripted::file("Empty.mp4", 0));
    let sink = RecordingSink::new();

    let delivered = download_single(&downloader, &sink, DownloadRequest::video(URL, QualityTier::Best)).await;

    assert!(!delivered);
    assert!(sink.files().is_empty());
    assert_eq!(sink.last_status().as_deref(), Some("❌ Downloaded file is empty."));
}

#[tokio::test]
async fn test_oversized_file_is_rejected_and_deleted() {
    let downloader = MockDownloader::new()
        .with_max_file_size(1024)
        .with_outcome(URL, Scripted::file("Huge.mp4", 4096));
    let sink = RecordingSink::new();

    let delivered = download_single(&downloader, &sink, DownloadRequest::video(URL, QualityTier::Best)).await;

    assert!(!delivered);
    assert!(sink.files().is_empty());
    let status = sink.last_status().unwrap();
    assert!(status.starts_with("❌ File too large"), "{}", status);
}

#[tokio::test]
async fn test_send_failure_still_removes_file() {
    let downloader = MockDownloader::new().with_outcome(URL, Scripted::file("Clip.mp4", 512));
    let sink = RecordingSink::failing_sends();

    let delivered = download_single(&downloader, &sink, DownloadRequest::video(URL, QualityTier::Medium)).await;

    assert!(!delivered);
    assert_eq!(sink.last_status().as_deref(), Some(messages::SEND_FAILED));
    let SinkEvent::File { workdir, .. } = &sink.files()[0] else {
        panic!("expected a file event");
    };
    assert!(!workdir.exists());
}

#[tokio::test]
async fn test_tool_failure_message() {
    let downloader =
        MockDownloader::new().with_outcome(URL, Scripted::Fail(DownloadFailure::Tool("Unsupported URL".into())));
    let sink = RecordingSink::new();

    download_single(&downloader, &sink, DownloadRequest::video(URL, QualityTier::Best)).await;

    assert_eq!(sink.last_status().as_deref(), Some("❌ Download failed: Unsupported URL"));
}
