//! Terminal presentation for the memory game.
//!
//! Rendering is split in two halves:
//! - [`GameView`] is pure: it paints a [`GameSnapshot`](memory_match_core::GameSnapshot)
//!   plus a small [`ViewState`] (cursor, toast, summary, leaderboard) into a
//!   [`FrameBuffer`]. No I/O, so it is unit-tested directly.
//! - [`TerminalRenderer`] flushes framebuffers to the terminal, writing only
//!   the cells that changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use memory_match_core as core;
pub use memory_match_store as store;
pub use memory_match_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{
    leaderboard_line, stars_text, symbol_glyph, toast_text, GameView, ViewState, Viewport,
};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
