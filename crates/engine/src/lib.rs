//! Engine session layer.
//!
//! Ties the pure rules in `memory-match-core` to its two collaborators:
//! a [`PresentationSurface`] that draws the round and a
//! [`ScoreStore`](memory_match_store::ScoreStore) that keeps finished results.
//!
//! Data flow per command:
//!
//! ```text
//! input ──► Session queue ──► MemoryGame ──► events ──► PresentationSurface
//!                                               │
//!                                   RoundEnded  ▼
//!                                          ScoreStore ──► ranked list ──► surface
//! ```

pub mod session;
pub mod surface;

pub use memory_match_core as core;
pub use memory_match_store as store;
pub use memory_match_types as types;

pub use session::{utc_timestamp, Session, SessionCommand, TimestampFn};
pub use surface::{PresentationSurface, RecordingSurface};
