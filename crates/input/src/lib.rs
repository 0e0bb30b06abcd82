//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into [`InputAction`]s and tracks the grid cursor that turns
//! "flip here" into a tile id.

pub mod cursor;
pub mod map;

pub use memory_match_types as types;

pub use cursor::{Cursor, Direction};
pub use map::{handle_key_event, should_quit, InputAction};
