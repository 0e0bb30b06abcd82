//! Score store - persisted leaderboard of finished rounds
//!
//! The engine hands one [`ScoreEntry`] to the store when a round ends; the
//! store ranks it against earlier results (score-descending, top 10) and
//! writes the list back as a JSON array under a single storage key:
//!
//! ```json
//! [{"score":2190,"difficulty":"easy","moves":6,"time":6,"date":"2026-10-18T09:30:00.000Z"}]
//! ```
//!
//! # Module Structure
//!
//! - [`entry`]: the persisted record
//! - [`leaderboard`]: ranking and truncation
//! - [`backend`]: key-value storage (files on disk, or memory)
//! - [`store`]: the [`ScoreStore`] interface and its keyed JSON implementation
//!
//! # Example
//!
//! ```
//! use memory_match_store::{KeyedScoreStore, MemoryStorage, ScoreEntry, ScoreStore};
//! use memory_match_types::DifficultyId;
//!
//! let mut store = KeyedScoreStore::new(MemoryStorage::new());
//! assert!(store.load_top().is_empty());
//!
//! let ranked = store.submit(ScoreEntry::new(
//!     1250,
//!     DifficultyId::Easy,
//!     8,
//!     25,
//!     "2026-10-18T09:30:00.000Z",
//! ));
//! assert_eq!(ranked[0].score, 1250);
//! ```

pub mod backend;
pub mod entry;
pub mod error;
pub mod leaderboard;
pub mod store;

pub use memory_match_types as types;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use entry::ScoreEntry;
pub use error::StoreError;
pub use leaderboard::Leaderboard;
pub use store::{KeyedScoreStore, ScoreStore, LEADERBOARD_KEY};
