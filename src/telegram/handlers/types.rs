//! Handler types and dependencies

use std::sync::Arc;

use crate::download::executor::Downloader;
use crate::telegram::cache::SessionCache;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub downloader: Arc<dyn Downloader>,
    pub sessions: Arc<SessionCache>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(downloader: Arc<dyn Downloader>, sessions: Arc<SessionCache>) -> Self {
        Self { downloader, sessions }
    }
}
