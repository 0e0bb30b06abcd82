//! Memory Match (workspace facade crate).
//!
//! Re-exports the member crates as `memory_match::{core,engine,input,store,term,types}`
//! and hosts the pieces the binary needs on top of them: environment
//! configuration and the terminal presentation surface.

pub mod app;
pub mod config;

pub use memory_match_core as core;
pub use memory_match_engine as engine;
pub use memory_match_input as input;
pub use memory_match_store as store;
pub use memory_match_term as term;
pub use memory_match_types as types;

pub use app::{App, TerminalSurface};
pub use config::AppConfig;
