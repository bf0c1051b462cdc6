//! Download flows started from the menu.
//!
//! Both flows are generic over [`Downloader`] and [`ChatSink`]. Every
//! [`DownloadedFile`] is released right after its send attempt, whether the
//! send worked or not.

use crate::core::config;
use crate::download::executor::{DownloadedFile, Downloader};
use crate::download::metadata::MediaInfo;
use crate::download::playlist::{fanout_entries, PlaylistOutcome, PlaylistStatus};
use crate::download::progress::{discard_progress, DownloadProgress};
use crate::download::request::{DownloadRequest, MediaKind, QualityTier};
use crate::telegram::messages;
use crate::telegram::sink::ChatSink;
use tokio::sync::mpsc;

/// Status edits are best effort; a failed edit never stops a download.
async fn status<S: ChatSink + ?Sized>(sink: &S, text: &str) {
    if let Err(e) = sink.set_status(text).await {
        log::warn!("Failed to update status message: {}", e);
    }
}

async fn notice<S: ChatSink + ?Sized>(sink: &S, text: &str) {
    if let Err(e) = sink.notify(text).await {
        log::warn!("Failed to send notice: {}", e);
    }
}

fn release(file: DownloadedFile) {
    let name = file.file_name();
    if let Err(e) = file.cleanup() {
        log::error!("Failed to clean up {}: {}", name, e);
    }
}

/// Sends `file` and releases it. Returns whether the send succeeded.
async fn send_and_release<S: ChatSink + ?Sized>(sink: &S, file: DownloadedFile, kind: MediaKind) -> bool {
    let sent = sink.send_file(&file, kind).await;
    let name = file.file_name();
    release(file);
    match sent {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to send {}: {}", name, e);
            false
        }
    }
}

/// Percent step a sample falls into, e.g. 47% → 40 with a 20% step.
fn progress_step(percent: u8) -> u8 {
    let step = config::progress::EDIT_STEP_PERCENT.max(1);
    percent.min(100) / step * step
}

/// Edits the status message each time progress crosses a new step.
async fn report_progress<S: ChatSink + ?Sized>(sink: &S, mut rx: mpsc::UnboundedReceiver<DownloadProgress>) {
    let mut last_step = 0u8;
    while let Some(sample) = rx.recv().await {
        let step = progress_step(sample.percent);
        if step > last_step {
            last_step = step;
            status(sink, &messages::progress(step)).await;
        }
    }
}

/// Downloads one video or audio and delivers it to the chat.
///
/// Returns true when the file reached the chat.
pub async fn download_single<D, S>(downloader: &D, sink: &S, request: DownloadRequest) -> bool
where
    D: Downloader + ?Sized,
    S: ChatSink + ?Sized,
{
    status(sink, messages::STARTING_DOWNLOAD).await;

    let (tx, rx) = mpsc::unbounded_channel();
    // The sender moves into fetch, so the reporter ends when fetch returns
    let (result, ()) = tokio::join!(downloader.fetch(&request, tx), report_progress(sink, rx));

    let file = match result {
        Ok(file) => file,
        Err(failure) => {
            log::warn!("Download of {} failed: {}", request.url(), failure);
            status(sink, &failure.user_message()).await;
            return false;
        }
    };

    status(sink, &messages::uploading(&file.file_name(), file.size())).await;
    if send_and_release(sink, file, request.kind()).await {
        status(sink, messages::DOWNLOAD_COMPLETED).await;
        true
    } else {
        status(sink, messages::SEND_FAILED).await;
        false
    }
}

/// Downloads the first playlist entries one by one.
///
/// A failed entry gets exactly one notice in the chat and the batch moves on.
pub async fn download_playlist<D, S>(downloader: &D, sink: &S, url: &str, kind: MediaKind) -> PlaylistOutcome
where
    D: Downloader + ?Sized,
    S: ChatSink + ?Sized,
{
    status(sink, messages::PLAYLIST_STARTED).await;

    let playlist = match downloader.fetch_info(url).await {
        Ok(MediaInfo::Playlist(p)) => p,
        Ok(MediaInfo::Video(_)) => {
            log::warn!("{} is not a playlist", url);
            status(sink, messages::PLAYLIST_UNAVAILABLE).await;
            return PlaylistOutcome::default();
        }
        Err(failure) => {
            log::warn!("Playlist info for {} failed: {}", url, failure);
            status(sink, messages::PLAYLIST_UNAVAILABLE).await;
            return PlaylistOutcome::default();
        }
    };

    let entries = fanout_entries(&playlist.entries);
    let total = entries.len();
    let mut outcome = PlaylistOutcome::default();

    for (i, entry) in entries.iter().enumerate() {
        status(sink, &messages::playlist_entry_progress(i + 1, total, &entry.title)).await;

        let request = DownloadRequest::new(entry.url.as_str(), kind, QualityTier::Best, false);
        match downloader.fetch(&request, discard_progress()).await {
            Ok(file) => {
                if send_and_release(sink, file, kind).await {
                    outcome.record_delivered();
                } else {
                    notice(sink, messages::SEND_FAILED).await;
                    outcome.record_failed();
                }
            }
            Err(failure) => {
                log::warn!("Playlist entry {} failed: {}", entry.url, failure);
                notice(sink, &messages::playlist_entry_failed(&entry.title, &failure.user_message())).await;
                outcome.record_failed();
            }
        }
    }

    let summary = match outcome.status() {
        PlaylistStatus::Failed => messages::PLAYLIST_ALL_FAILED.to_string(),
        PlaylistStatus::Complete | PlaylistStatus::Partial => {
            messages::playlist_completed(outcome.delivered, outcome.attempted)
        }
    };
    log::info!(
        "Playlist {} finished: {}/{} delivered ({:?})",
        url,
        outcome.delivered,
        outcome.attempted,
        outcome.status()
    );
    status(sink, &summary).await;

    outcome
}
