//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the engine, the score store and the terminal
//! front end all agree on these definitions.
//!
//! # Difficulty Catalog
//!
//! The catalog is fixed; it cannot be extended at runtime.
//!
//! | Id | Pairs | Tiles | Time limit |
//! |----|-------|-------|------------|
//! | `easy` | 6 | 12 | 60s |
//! | `medium` | 12 | 24 | 120s |
//! | `hard` | 18 | 36 | 180s |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CLOCK_TICK_MS` | 1000 | Round clock resolution |
//! | `MISMATCH_DELAY_MS` | 1000 | Reveal time before a mismatched pair is hidden |
//! | `SPEED_MATCH_WINDOW_MS` | 2000 | Speed Match achievement window |
//! | `ACHIEVEMENT_TOAST_MS` | 3000 | How long an achievement stays on screen |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{DifficultyId, GameAction, format_clock};
//!
//! let hard = DifficultyId::from_str("HARD").unwrap();
//! assert_eq!(hard.config().pair_count, 18);
//! assert_eq!(hard.config().tile_count(), 36);
//!
//! assert_eq!(GameAction::SetDifficulty(hard).to_string(), "difficulty:hard");
//! assert_eq!(format_clock(75), "1:15");
//! ```

use serde::{Deserialize, Serialize};

/// Round clock resolution (one engine tick per second)
pub const CLOCK_TICK_MS: u32 = 1000;

/// Reveal time before a mismatched pair turns face-down again
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// A pair resolved within this window of the previous flip earns Speed Match
pub const SPEED_MATCH_WINDOW_MS: u64 = 2000;

/// Display time for an achievement toast
pub const ACHIEVEMENT_TOAST_MS: u32 = 3000;

/// Base points for a matched pair, before the combo multiplier
pub const MATCH_BASE_POINTS: u32 = 100;

/// Points awarded per second left on the clock when the round ends
pub const TIME_BONUS_PER_SECOND: u32 = 10;

/// Combo length that earns Streak Bonus
pub const STREAK_BONUS_COMBO: u32 = 3;

/// Number of results kept on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Move budget per pair used by star grading (`pair_count * 2.5`)
///
/// Expressed as a fraction (numerator / denominator) to keep grading in integers.
pub const MOVE_BUDGET_PER_PAIR_NUM: u32 = 5;
pub const MOVE_BUDGET_PER_PAIR_DEN: u32 = 2;

/// Largest deck the catalog can ask for
pub const MAX_PAIRS: usize = 18;


/// Tile identifier: the tile's position in the dealt deck (0-indexed)
pub type TileId = usize;

/// Opaque symbol token shared by exactly two tiles of a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u8);

impl Symbol {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The three difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyId {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl DifficultyId {
    pub const ALL: [DifficultyId; 3] = [DifficultyId::Easy, DifficultyId::Medium, DifficultyId::Hard];

    /// Parse difficulty id from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(DifficultyId::Easy),
            "medium" => Some(DifficultyId::Medium),
            "hard" => Some(DifficultyId::Hard),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyId::Easy => "easy",
            DifficultyId::Medium => "medium",
            DifficultyId::Hard => "hard",
        }
    }

    /// Catalog entry for this tier
    pub fn config(&self) -> Difficulty {
        match self {
            DifficultyId::Easy => Difficulty::new(6, 60),
            DifficultyId::Medium => Difficulty::new(12, 120),
            DifficultyId::Hard => Difficulty::new(18, 180),
        }
    }

    /// Columns of the board grid for this tier
    pub fn grid_columns(&self) -> usize {
        match self {
            DifficultyId::Easy => 4,
            DifficultyId::Medium | DifficultyId::Hard => 6,
        }
    }
}

impl std::fmt::Display for DifficultyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deck size and countdown budget of a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Difficulty {
    pub pair_count: u32,
    pub time_limit_secs: u32,
}

impl Difficulty {
    pub const fn new(pair_count: u32, time_limit_secs: u32) -> Self {
        Self {
            pair_count,
            time_limit_secs,
        }
    }

    pub fn tile_count(&self) -> usize {
        (self.pair_count as usize) * 2
    }

    /// Twice the star-grading move budget (`pair_count * 2.5 * 2`)
    pub fn move_budget_x2(&self) -> u32 {
        self.pair_count * MOVE_BUDGET_PER_PAIR_NUM * 2 / MOVE_BUDGET_PER_PAIR_DEN
    }
}

/// Per-round achievements
///
/// - **SpeedMatch**: a pair resolved within 2 seconds of the previous flip
/// - **CleanOpener**: the first move of the round is a match
/// - **StreakBonus**: three matches in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    SpeedMatch,
    CleanOpener,
    StreakBonus,
}

impl AchievementId {
    pub const ALL: [AchievementId; 3] = [
        AchievementId::SpeedMatch,
        AchievementId::CleanOpener,
        AchievementId::StreakBonus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::SpeedMatch => "Speed Match",
            AchievementId::CleanOpener => "Clean Opener",
            AchievementId::StreakBonus => "Streak Bonus",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::SpeedMatch => "Match a pair in under 2 seconds",
            AchievementId::CleanOpener => "Find the first pair without a mistake",
            AchievementId::StreakBonus => "Match 3 pairs in a row",
        }
    }

    /// Bit used by the engine's earned set
    pub fn bit(&self) -> u8 {
        match self {
            AchievementId::SpeedMatch => 1 << 0,
            AchievementId::CleanOpener => 1 << 1,
            AchievementId::StreakBonus => 1 << 2,
        }
    }
}

/// Player intents accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Flip(TileId),
    Restart,
    SetDifficulty(DifficultyId),
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameAction::Flip(id) => write!(f, "flip:{id}"),
            GameAction::Restart => f.write_str("restart"),
            GameAction::SetDifficulty(id) => write!(f, "difficulty:{id}"),
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Win,
    Timeout,
}

impl RoundOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::Win => "win",
            RoundOutcome::Timeout => "timeout",
        }
    }
}

/// Format seconds as `M:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
