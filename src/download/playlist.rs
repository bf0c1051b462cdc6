//! Playlist fan-out bookkeeping.
//!
//! Only the first [`limits::PLAYLIST_FANOUT`] entries are downloaded, one
//! after another. Each entry is independent: a failure is counted and the
//! batch moves on.

use crate::core::config::limits;
use crate::download::metadata::PlaylistEntry;

/// Overall result of a playlist batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistStatus {
    /// Every attempted entry was delivered
    Complete,
    /// At least one, but not every, entry was delivered
    Partial,
    /// Nothing was delivered
    Failed,
}

/// Counters of a playlist batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaylistOutcome {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

impl PlaylistOutcome {
    pub fn record_delivered(&mut self) {
        self.attempted += 1;
        self.delivered += 1;
    }

    pub fn record_failed(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }

    pub fn status(&self) -> PlaylistStatus {
        match (self.delivered, self.attempted) {
            (0, _) => PlaylistStatus::Failed,
            (d, a) if d == a => PlaylistStatus::Complete,
            _ => PlaylistStatus::Partial,
        }
    }
}

/// Entries a batch downloads.
pub fn fanout_entries(entries: &[PlaylistEntry]) -> &[PlaylistEntry] {
    &entries[..entries.len().min(limits::PLAYLIST_FANOUT)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<PlaylistEntry> {
        (1..=n)
            .map(|i| PlaylistEntry {
                url: format!("https://youtube.com/watch?v={}", i),
                title: format!("Video {}", i),
                position: i,
            })
            .collect()
    }

    #[test]
    fn test_status() {
        let mut outcome = PlaylistOutcome::default();
        assert_eq!(outcome.status(), PlaylistStatus::Failed);

        outcome.record_delivered();
        outcome.record_delivered();
        assert_eq!(outcome.status(), PlaylistStatus::Complete);

        outcome.record_failed();
        assert_eq!(outcome.status(), PlaylistStatus::Partial);
        assert_eq!(outcome.attempted, 3);
    }

    #[test]
    fn test_all_failed() {
        let mut outcome = PlaylistOutcome::default();
        outcome.record_failed();
        outcome.record_failed();
        assert_eq!(outcome.status(), PlaylistStatus::Failed);
    }

    #[test]
    fn test_fanout_is_bounded() {
        assert_eq!(fanout_entries(&entries(5)).len(), limits::PLAYLIST_FANOUT);
        assert_eq!(fanout_entries(&entries(2)).len(), 2);
        assert!(fanout_entries(&[]).is_empty());
    }
}
