//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains every rule of the memory game and nothing else. It has
//! no knowledge of terminals, storage or wall-clock time:
//!
//! - **Deterministic**: time only moves through [`MemoryGame::tick`]
//! - **Testable**: rules are unit-tested next to the code that implements them
//! - **Portable**: can run behind any front end (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`deck`]: shuffled decks where each symbol appears exactly twice
//! - [`game_state`]: the round state machine (flips, resolution, clock, grading)
//! - [`scheduler`]: cancellable timed tasks owned by a round
//! - [`scoring`]: match points, time bonus and star rating
//! - [`achievements`]: per-round achievement set and evaluation
//! - [`events`]: notifications drained by the caller after each input
//! - [`snapshot`]: plain data view for renderers
//!
//! # Game Rules
//!
//! - Two flips make a move. A match locks both tiles face-up and scores
//!   `100 + 50 * combo`; a mismatch breaks the combo and hides both tiles
//!   after one second, rejecting new flips until then.
//! - The clock starts on the first flip. Running out of time ends the round;
//!   so does matching every pair.
//! - At the end, each second left is worth 10 points and the round earns one
//!   to three stars for speed and efficiency.
//!
//! # Example
//!
//! ```
//! use memory_match_core::MemoryGame;
//! use memory_match_types::{DifficultyId, GameAction};
//!
//! let mut game = MemoryGame::new(DifficultyId::Easy);
//! assert_eq!(game.tiles().len(), 12);
//!
//! game.apply_action(GameAction::Flip(0));
//! assert!(game.started());
//!
//! // One second of round time.
//! game.tick(1000);
//! assert_eq!(game.elapsed_secs(), 1);
//!
//! for event in game.take_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod achievements;
pub mod deck;
pub mod events;
pub mod game_state;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use achievements::AchievementSet;
pub use deck::{new_deck, Tile};
pub use events::{GameEvent, RoundSummary};
pub use game_state::{MemoryGame, RoundState, TurnPhase};
pub use scheduler::{Scheduler, TaskId, TaskKind};
pub use scoring::{grade_round, match_points, star_rating, time_bonus, GradeResult};
pub use snapshot::{GameSnapshot, TileSnapshot};
