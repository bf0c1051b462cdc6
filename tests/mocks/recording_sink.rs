//! Chat sink that records every call

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use tubedrop::core::{AppError, AppResult};
use tubedrop::download::executor::DownloadedFile;
use tubedrop::download::MediaKind;
use tubedrop::telegram::ChatSink;

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Status(String),
    Notice(String),
    File {
        name: String,
        kind: MediaKind,
        /// Whether the file was on disk when it was handed over
        existed: bool,
        workdir: PathBuf,
    },
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
    fail_sends: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink whose uploads always fail
    pub fn failing_sends() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses().pop()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Notice(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn files(&self) -> Vec<SinkEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, SinkEvent::File { .. }))
            .collect()
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn set_status(&self, text: &str) -> AppResult<()> {
        self.events.lock().unwrap().push(SinkEvent::Status(text.to_string()));
        Ok(())
    }

    async fn notify(&self, text: &str) -> AppResult<()> {
        self.events.lock().unwrap().push(SinkEvent::Notice(text.to_string()));
        Ok(())
    }

    async fn send_file(&self, file: &DownloadedFile, kind: MediaKind) -> AppResult<()> {
        self.events.lock().unwrap().push(SinkEvent::File {
            name: file.file_name(),
            kind,
            existed: file.path().exists(),
            workdir: file.workdir().to_path_buf(),
        });
        if self.fail_sends {
            return Err(AppError::Download("upload rejected".to_string()));
        }
        Ok(())
    }
}
