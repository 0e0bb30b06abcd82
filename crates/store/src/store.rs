//! Score store: persisted top-N leaderboard.
//!
//! Reads are fail-soft. Missing data means an empty leaderboard, and so does
//! data that cannot be parsed. Write failures are logged and the freshly
//! ranked list is still returned to the caller. Malformed data is replaced
//! on the next submit; storage that could not be read is left untouched.

use log::{debug, error, warn};

use crate::backend::StorageBackend;
use crate::entry::ScoreEntry;
use crate::error::StoreError;
use crate::leaderboard::Leaderboard;
use crate::types::LEADERBOARD_CAPACITY;

/// Storage key holding the serialized leaderboard.
pub const LEADERBOARD_KEY: &str = "memoryGameLeaderboard";

pub trait ScoreStore {
    /// Ranked results, best first, at most the store's capacity.
    fn load_top(&self) -> Vec<ScoreEntry>;

    /// Insert a result, persist, and return the new ranking.
    fn submit(&mut self, entry: ScoreEntry) -> Vec<ScoreEntry>;
}

/// [`ScoreStore`] that keeps the leaderboard as a JSON array under one key.
#[derive(Debug, Clone)]
pub struct KeyedScoreStore<B> {
    backend: B,
    key: String,
    capacity: usize,
}

impl<B: StorageBackend> KeyedScoreStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            key: LEADERBOARD_KEY.to_string(),
            capacity: LEADERBOARD_CAPACITY,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Strict read: surfaces storage and parse errors.
    pub fn try_load(&self) -> Result<Leaderboard, StoreError> {
        let Some(text) = self.backend.load(&self.key)? else {
            return Ok(Leaderboard::with_capacity(self.capacity));
        };
        if text.trim().is_empty() {
            return Ok(Leaderboard::with_capacity(self.capacity));
        }
        let entries: Vec<ScoreEntry> = serde_json::from_str(&text)?;
        Ok(Leaderboard::from_entries(entries, self.capacity))
    }

    fn load_or_empty(&self) -> Leaderboard {
        match self.try_load() {
            Ok(board) => board,
            Err(e) => {
                warn!("leaderboard '{}' unreadable, starting empty: {}", self.key, e);
                Leaderboard::with_capacity(self.capacity)
            }
        }
    }

    fn persist(&mut self, board: &Leaderboard) -> Result<(), StoreError> {
        let text = serde_json::to_string(board.entries())?;
        self.backend.save(&self.key, &text)
    }
}

impl<B: StorageBackend> ScoreStore for KeyedScoreStore<B> {
    fn load_top(&self) -> Vec<ScoreEntry> {
        self.load_or_empty().into_entries()
    }

    fn submit(&mut self, entry: ScoreEntry) -> Vec<ScoreEntry> {
        let (mut board, writable) = match self.try_load() {
            Ok(board) => (board, true),
            Err(e @ StoreError::Malformed(_)) => {
                warn!("leaderboard '{}' malformed, replacing it: {}", self.key, e);
                (Leaderboard::with_capacity(self.capacity), true)
            }
            Err(e) => {
                warn!("leaderboard '{}' unreadable, not saving: {}", self.key, e);
                (Leaderboard::with_capacity(self.capacity), false)
            }
        };
        match board.insert(entry) {
            Some(rank) => debug!("result ranked #{}", rank + 1),
            None => debug!("result below the top {}", self.capacity),
        }
        if writable {
            if let Err(e) = self.persist(&board) {
                error!("failed to persist leaderboard '{}': {}", self.key, e);
            }
        }
        board.into_entries()
    }
}
