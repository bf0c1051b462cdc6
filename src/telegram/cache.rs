//! Session cache mapping short tokens to URLs.
//!
//! Callback payloads are capped at 64 bytes by Telegram, so menus carry a
//! token instead of the URL. The token is the first 10 hex characters of the
//! URL's SHA-256, which makes it deterministic: two URLs sharing a prefix
//! overwrite each other. Entries live for the lifetime of the process and
//! are lost on restart.

use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Length of a session token in hex characters
pub const TOKEN_LEN: usize = 10;

/// Short identifier of a remembered URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Derives the token of `url`.
    pub fn for_url(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(TOKEN_LEN);
        Self(hex)
    }

    /// Accepts a token read back from a callback payload.
    pub fn parse(raw: &str) -> Option<Self> {
        (raw.len() == TOKEN_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
struct Entries {
    urls: HashMap<SessionToken, String>,
    // Insertion order, only tracked when a limit is set
    order: VecDeque<SessionToken>,
}

/// Token → URL store shared by all handlers.
///
/// Unbounded by default. With a limit, the oldest entry is evicted first.
#[derive(Default)]
pub struct SessionCache {
    entries: Mutex<Entries>,
    limit: Option<usize>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `limit` URLs (`None` for unbounded).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            limit: limit.filter(|l| *l > 0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores `url` and returns its token.
    pub fn remember(&self, url: &str) -> SessionToken {
        let token = SessionToken::for_url(url);
        let mut entries = self.lock();

        let is_new = entries.urls.insert(token.clone(), url.to_string()).is_none();
        if let Some(limit) = self.limit {
            if is_new {
                entries.order.push_back(token.clone());
            }
            while entries.urls.len() > limit {
                match entries.order.pop_front() {
                    Some(oldest) => {
                        entries.urls.remove(&oldest);
                        log::debug!("Session cache evicted {}", oldest);
                    }
                    None => break,
                }
            }
        }

        token
    }

    /// Looks up the URL behind `token`.
    pub fn resolve(&self, token: &SessionToken) -> Option<String> {
        self.lock().urls.get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
