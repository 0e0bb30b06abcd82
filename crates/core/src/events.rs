//! Notifications emitted by the engine.
//!
//! The engine queues events while it processes an input; the caller drains
//! them afterwards with [`MemoryGame::take_events`](crate::MemoryGame::take_events)
//! and forwards them to whatever renders the round.

use crate::types::{format_clock, AchievementId, DifficultyId, RoundOutcome, Symbol, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// First flip of the round; the clock is now running.
    RoundStarted,
    TileFlipped { tile: TileId, symbol: Symbol },
    PairMatched { pair: [TileId; 2], points: u32, combo: u32 },
    /// The pair stays face-up until `TilesHidden` arrives.
    PairMismatched { pair: [TileId; 2] },
    TilesHidden { pair: [TileId; 2] },
    /// Moves, clock or score changed.
    StatsChanged,
    AchievementEarned(AchievementId),
    RoundEnded(RoundSummary),
    /// A fresh round replaced the previous one (restart or difficulty change).
    RoundReset { difficulty: DifficultyId },
}

/// Final result of a round, produced exactly once when it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    pub difficulty: DifficultyId,
    /// Score before the time bonus.
    pub base_score: u32,
    pub time_bonus: u32,
    pub final_score: u32,
    pub moves: u32,
    pub elapsed_secs: u32,
    pub matched_pairs: u32,
    pub pair_count: u32,
    pub stars: u8,
}

impl RoundSummary {
    /// Player-facing summary line.
    pub fn text(&self) -> String {
        match self.outcome {
            RoundOutcome::Win => format!(
                "You completed the game in {} with {} moves! Final score: {}",
                format_clock(self.elapsed_secs),
                self.moves,
                self.final_score
            ),
            RoundOutcome::Timeout => format!(
                "Time's up! You found {} of {} pairs in {} moves. Final score: {}",
                self.matched_pairs, self.pair_count, self.moves, self.final_score
            ),
        }
    }
}
