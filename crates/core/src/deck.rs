//! Deck module - tile generation and shuffling
//!
//! A deck holds `2 * pair_count` tiles. Every symbol appears on exactly two
//! tiles, and tile ids are assigned after shuffling so that an id addresses a
//! grid cell for the whole round.
//!
//! Shuffling uses a small LCG seeded from the wall clock. Callers never see
//! or pass a seed; only the pairing invariant is part of the contract.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{Symbol, TileId, MAX_PAIRS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub(crate) struct SimpleRng {
    state: u32,
}

/// Mixed into every clock seed so two decks dealt in the same instant differ.
static SEED_SALT: AtomicU32 = AtomicU32::new(0x9E37_79B9);

impl SimpleRng {
    pub(crate) fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the system clock.
    pub(crate) fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(0);
        let salt = SEED_SALT.fetch_add(0x6D2B_79F5, Ordering::Relaxed);
        Self::new(nanos ^ salt)
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in range [0, max). Uses the high bits, the low bits of an LCG cycle quickly.
    pub(crate) fn next_range(&mut self, max: u32) -> u32 {
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub(crate) fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// A single card on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    symbol: Symbol,
    flipped: bool,
    matched: bool,
}

impl Tile {
    pub fn new(id: TileId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            flipped: false,
            matched: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Face-up tiles are either part of the current selection or already matched.
    pub fn is_face_up(&self) -> bool {
        self.flipped || self.matched
    }

    pub(crate) fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    /// Matching is one-way for the lifetime of a round.
    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}

/// Deal a shuffled deck of `pair_count` pairs.
///
/// `pair_count` is clamped to the symbol pool size.
pub fn new_deck(pair_count: u32) -> Vec<Tile> {
    new_deck_with(pair_count, &mut SimpleRng::from_clock())
}

pub(crate) fn new_deck_with(pair_count: u32, rng: &mut SimpleRng) -> Vec<Tile> {
    let pairs = (pair_count as usize).min(MAX_PAIRS);
    let construction: Vec<Symbol> = (0..pairs as u8).flat_map(|s| [Symbol(s), Symbol(s)]).collect();

    let mut symbols = construction.clone();
    rng.shuffle(&mut symbols);
    // A two-tile deck has only one arrangement.
    while pairs > 1 && symbols == construction {
        rng.shuffle(&mut symbols);
    }

    symbols
        .into_iter()
        .enumerate()
        .map(|(id, symbol)| Tile::new(id, symbol))
        .collect()
}
