//! Scripted downloader
//!
//! Each URL is mapped to an outcome. Successful outcomes create a real work
//! directory with a file of the requested size, so cleanup can be observed
//! on disk.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tubedrop::download::executor::{inspect_output, DownloadResult, Downloader};
use tubedrop::download::metadata::{MediaInfo, PlaylistEntry, PlaylistInfo};
use tubedrop::download::progress::{DownloadProgress, ProgressSender};
use tubedrop::download::{DownloadFailure, DownloadRequest};

/// Outcome of a scripted fetch
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Produce a file with this name and size
    File { name: String, size: usize },
    /// Fail with this failure
    Fail(DownloadFailure),
}

impl Scripted {
    pub fn file(name: &str, size: usize) -> Self {
        Scripted::File {
            name: name.to_string(),
            size,
        }
    }
}

pub struct MockDownloader {
    info: Option<MediaInfo>,
    outcomes: HashMap<String, Scripted>,
    max_file_size: u64,
    requests: Mutex<Vec<DownloadRequest>>,
    workdirs: Mutex<Vec<PathBuf>>,
}

impl MockDownloader {
    pub fn new() -> Self {
        Self {
            info: None,
            outcomes: HashMap::new(),
            max_file_size: 50 * 1024 * 1024,
            requests: Mutex::new(Vec::new()),
            workdirs: Mutex::new(Vec::new()),
        }
    }

    pub fn with_info(mut self, info: MediaInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_outcome(mut self, url: &str, outcome: Scripted) -> Self {
        self.outcomes.insert(url.to_string(), outcome);
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Requests seen by `fetch`, in order
    pub fn requests(&self) -> Vec<DownloadRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Work directories created by successful fetches
    pub fn workdirs(&self) -> Vec<PathBuf> {
        self.workdirs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for MockDownloader {
    async fn fetch_info(&self, _url: &str) -> Result<MediaInfo, DownloadFailure> {
        self.info.clone().ok_or(DownloadFailure::InfoUnavailable)
    }

    async fn fetch(&self, request: &DownloadRequest, progress: ProgressSender) -> DownloadResult {
        self.requests.lock().unwrap().push(request.clone());

        let outcome = self
            .outcomes
            .get(request.url())
            .cloned()
            .unwrap_or(Scripted::Fail(DownloadFailure::Unavailable));

        match outcome {
            Scripted::Fail(failure) => Err(failure),
            Scripted::File { name, size } => {
                for percent in [10u8, 45, 80, 100] {
                    let _ = progress.send(DownloadProgress {
                        percent,
                        speed_mbs: None,
                        eta_seconds: None,
                        total_size: Some(size as u64),
                    });
                }
                let dir = tempfile::Builder::new().prefix("tubedrop-test-").tempdir().unwrap();
                std::fs::write(dir.path().join(&name), vec![0u8; size]).unwrap();
                self.workdirs.lock().unwrap().push(dir.path().to_path_buf());
                inspect_output(dir, self.max_file_size)
            }
        }
    }
}

/// Playlist info whose entries are `https://youtube.com/watch?v=<n>`
pub fn playlist_info(entry_count: usize) -> MediaInfo {
    let entries = (1..=entry_count.min(5))
        .map(|i| PlaylistEntry {
            url: format!("https://youtube.com/watch?v={}", i),
            title: format!("Video {}", i),
            position: i,
        })
        .collect();
    MediaInfo::Playlist(PlaylistInfo {
        title: "Test Playlist".to_string(),
        uploader: "Tester".to_string(),
        entry_count,
        entries,
    })
}
