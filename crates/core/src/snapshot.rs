use crate::achievements::AchievementSet;
use crate::events::RoundSummary;
use crate::game_state::{MemoryGame, TurnPhase};
use crate::types::{format_clock, DifficultyId, Symbol, TileId};

/// Render-side view of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub id: TileId,
    pub symbol: Symbol,
    pub flipped: bool,
    pub matched: bool,
}

impl TileSnapshot {
    pub fn face_up(&self) -> bool {
        self.flipped || self.matched
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub difficulty: DifficultyId,
    pub round_id: u32,
    pub tiles: Vec<TileSnapshot>,
    pub phase: TurnPhase,
    pub matched_pairs: u32,
    pub pair_count: u32,
    pub moves: u32,
    pub score: u32,
    pub combo: u32,
    pub elapsed_secs: u32,
    pub time_limit_secs: u32,
    pub started: bool,
    pub achievements: AchievementSet,
    pub summary: Option<RoundSummary>,
}

impl GameSnapshot {
    /// Elapsed time as `M:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }

    pub fn finished(&self) -> bool {
        self.summary.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            difficulty: DifficultyId::default(),
            round_id: 0,
            tiles: Vec::new(),
            phase: TurnPhase::Idle,
            matched_pairs: 0,
            pair_count: 0,
            moves: 0,
            score: 0,
            combo: 0,
            elapsed_secs: 0,
            time_limit_secs: 0,
            started: false,
            achievements: AchievementSet::new(),
            summary: None,
        }
    }
}

impl MemoryGame {
    /// Fill `out`, reusing its tile buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let round = self.round();
        let config = self.config();

        out.tiles.clear();
        out.tiles.extend(round.tiles().iter().map(|t| TileSnapshot {
            id: t.id(),
            symbol: t.symbol(),
            flipped: t.is_flipped(),
            matched: t.is_matched(),
        }));
        out.difficulty = self.difficulty();
        out.round_id = self.round_id();
        out.phase = round.phase();
        out.matched_pairs = round.matched_pairs();
        out.pair_count = config.pair_count;
        out.moves = round.moves();
        out.score = round.score();
        out.combo = round.combo();
        out.elapsed_secs = round.elapsed_secs();
        out.time_limit_secs = config.time_limit_secs;
        out.started = round.started();
        out.achievements = round.achievements();
        out.summary = round.summary().cloned();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
