//! Ranking rules for the leaderboard.

use crate::entry::ScoreEntry;
use crate::types::LEADERBOARD_CAPACITY;

/// Score-descending, bounded list of results.
///
/// Ties keep insertion order, so an older result stays ahead of a newer one
/// with the same score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
    capacity: usize,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::with_capacity(LEADERBOARD_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Build from stored entries, re-ranking and truncating them.
    pub fn from_entries(entries: Vec<ScoreEntry>, capacity: usize) -> Self {
        let mut board = Self { entries, capacity };
        board.rank();
        board
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScoreEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert a result. Returns its 0-based rank, or `None` if it did not make the cut.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        // Position after every entry with an equal or higher score.
        let pos = self.entries.partition_point(|e| e.score >= entry.score);
        if pos >= self.capacity {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(self.capacity);
        Some(pos)
    }

    fn rank(&mut self) {
        // Stable sort keeps stored order among equal scores.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}
