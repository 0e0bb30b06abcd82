//! Game state module - the round state machine
//!
//! [`MemoryGame`] owns the active difficulty and exactly one [`RoundState`].
//! Every rule transition lives here: flips, match/mismatch resolution,
//! scoring, achievements, the round clock and end-of-round grading.
//!
//! A turn moves through three states:
//!
//! - **Idle**: no tile selected
//! - **OneFlipped**: one tile face-up, waiting for the second
//! - **Resolving**: two tiles face-up; a match clears the selection at once,
//!   a mismatch holds it until the hide task fires
//!
//! Restarting or changing difficulty replaces the round wholesale. The
//! round's scheduler (clock and pending hide) is dropped with it, so nothing
//! scheduled for an old round can touch the new one.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::achievements::{self, AchievementSet, TurnOutcome};
use crate::deck::{new_deck, Tile};
use crate::events::{GameEvent, RoundSummary};
use crate::scheduler::{Scheduler, TaskId, TaskKind};
use crate::scoring::{grade_round, match_points};
use crate::types::*;

/// Turn phase derived from the flipped selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    OneFlipped,
    Resolving,
}

/// Everything that belongs to one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    difficulty: DifficultyId,
    tiles: Vec<Tile>,
    flipped: ArrayVec<TileId, 2>,
    matched_pairs: u32,
    moves: u32,
    score: u32,
    combo: u32,
    elapsed_secs: u32,
    started: bool,
    achievements: AchievementSet,
    /// Scheduler time of the most recent flip.
    last_flip_ms: Option<u64>,
    scheduler: Scheduler,
    clock_task: Option<TaskId>,
    hide_task: Option<TaskId>,
    summary: Option<RoundSummary>,
}

impl RoundState {
    /// Deal a fresh round at move 0.
    pub fn new(difficulty: DifficultyId) -> Self {
        Self::with_tiles(difficulty, new_deck(difficulty.config().pair_count))
    }

    pub(crate) fn with_tiles(difficulty: DifficultyId, tiles: Vec<Tile>) -> Self {
        Self {
            difficulty,
            tiles,
            flipped: ArrayVec::new(),
            matched_pairs: 0,
            moves: 0,
            score: 0,
            combo: 0,
            elapsed_secs: 0,
            started: false,
            achievements: AchievementSet::new(),
            last_flip_ms: None,
            scheduler: Scheduler::new(),
            clock_task: None,
            hide_task: None,
            summary: None,
        }
    }

    pub fn difficulty(&self) -> DifficultyId {
        self.difficulty
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn flipped(&self) -> &[TileId] {
        &self.flipped
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn achievements(&self) -> AchievementSet {
        self.achievements
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    pub fn clock_running(&self) -> bool {
        self.clock_task.is_some_and(|id| self.scheduler.is_scheduled(id))
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_task.is_some_and(|id| self.scheduler.is_scheduled(id))
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn phase(&self) -> TurnPhase {
        match self.flipped.len() {
            0 => TurnPhase::Idle,
            1 => TurnPhase::OneFlipped,
            _ => TurnPhase::Resolving,
        }
    }
}

/// The game engine.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    difficulty: DifficultyId,
    round: RoundState,
    /// Monotonic round id (increments on every reset).
    round_id: u32,
    events: Vec<GameEvent>,
}

impl MemoryGame {
    pub fn new(difficulty: DifficultyId) -> Self {
        Self {
            difficulty,
            round: RoundState::new(difficulty),
            round_id: 0,
            events: Vec::new(),
        }
    }

    /// Build a game around a prepared deck. Test support only.
    #[doc(hidden)]
    pub fn with_symbols(difficulty: DifficultyId, symbols: &[u8]) -> Self {
        debug_assert_eq!(symbols.len(), difficulty.config().tile_count());
        debug_assert!(
            symbols
                .iter()
                .all(|s| symbols.iter().filter(|&o| o == s).count() == 2),
            "every symbol must appear exactly twice"
        );
        let tiles = symbols
            .iter()
            .enumerate()
            .map(|(id, &s)| Tile::new(id, Symbol(s)))
            .collect();
        Self {
            difficulty,
            round: RoundState::with_tiles(difficulty, tiles),
            round_id: 0,
            events: Vec::new(),
        }
    }

    pub fn difficulty(&self) -> DifficultyId {
        self.difficulty
    }

    pub fn config(&self) -> Difficulty {
        self.difficulty.config()
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn tiles(&self) -> &[Tile] {
        self.round.tiles()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.round.tiles.get(id)
    }

    pub fn flipped(&self) -> &[TileId] {
        self.round.flipped()
    }

    pub fn matched_pairs(&self) -> u32 {
        self.round.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.round.moves
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn combo(&self) -> u32 {
        self.round.combo
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.round.elapsed_secs
    }

    pub fn started(&self) -> bool {
        self.round.started
    }

    pub fn is_finished(&self) -> bool {
        self.round.is_finished()
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.round.summary()
    }

    pub fn achievements(&self) -> AchievementSet {
        self.round.achievements
    }

    pub fn phase(&self) -> TurnPhase {
        self.round.phase()
    }

    /// Take the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a player intent. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Flip(tile) => self.request_flip(tile),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::SetDifficulty(id) => {
                self.set_difficulty(id);
                true
            }
        }
    }

    /// Flip a face-down tile.
    ///
    /// Ignored while two tiles are unresolved, for face-up or matched tiles,
    /// unknown ids, and once the round has ended.
    pub fn request_flip(&mut self, tile: TileId) -> bool {
        if self.round.is_finished() || self.round.flipped.is_full() {
            return false;
        }
        match self.round.tiles.get(tile) {
            Some(t) if !t.is_flipped() && !t.is_matched() => {}
            _ => return false,
        }

        if !self.round.started {
            self.start_clock();
        }

        let now = self.round.scheduler.now_ms();
        let previous_flip = self.round.last_flip_ms.replace(now);

        let symbol = {
            let t = &mut self.round.tiles[tile];
            t.set_flipped(true);
            t.symbol()
        };
        self.round.flipped.push(tile);
        self.events.push(GameEvent::TileFlipped { tile, symbol });

        if self.round.flipped.is_full() {
            self.round.moves += 1;
            let gap = previous_flip.map(|t| now.saturating_sub(t));
            self.resolve_turn(gap);
        }
        true
    }

    /// Discard the round and deal a new one with the same difficulty.
    pub fn restart(&mut self) {
        // Replacing the round drops its scheduler, and every task with it.
        self.round = RoundState::new(self.difficulty);
        self.round_id = self.round_id.wrapping_add(1);
        self.events.push(GameEvent::RoundReset {
            difficulty: self.difficulty,
        });
        debug!("round {} dealt ({})", self.round_id, self.difficulty);
    }

    /// Switch tier and deal a new round.
    pub fn set_difficulty(&mut self, difficulty: DifficultyId) {
        self.difficulty = difficulty;
        self.restart();
    }

    /// Advance round time by `elapsed_ms`, running every task that comes due.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let target = self.round.scheduler.now_ms() + elapsed_ms as u64;
        while let Some(task) = self.round.scheduler.pop_due(target) {
            self.run_task(task);
        }
        self.round.scheduler.advance_to(target);
    }

    fn start_clock(&mut self) {
        self.round.started = true;
        self.round.elapsed_secs = 0;
        self.round.clock_task = Some(
            self.round
                .scheduler
                .schedule_repeating(TaskKind::ClockTick, CLOCK_TICK_MS),
        );
        self.events.push(GameEvent::RoundStarted);
        info!(
            "round {} started ({}, {} pairs, {}s)",
            self.round_id,
            self.difficulty,
            self.config().pair_count,
            self.config().time_limit_secs
        );
    }

    fn run_task(&mut self, task: TaskKind) {
        match task {
            TaskKind::ClockTick => {
                self.round.elapsed_secs += 1;
                self.events.push(GameEvent::StatsChanged);
                let config = self.config();
                if self.round.elapsed_secs >= config.time_limit_secs
                    && self.round.matched_pairs < config.pair_count
                {
                    self.finish(RoundOutcome::Timeout);
                }
            }
            TaskKind::HideMismatch { pair } => {
                for id in pair {
                    self.round.tiles[id].set_flipped(false);
                }
                self.round.flipped.clear();
                self.round.hide_task = None;
                self.events.push(GameEvent::TilesHidden { pair });
            }
        }
    }

    fn resolve_turn(&mut self, flip_gap_ms: Option<u64>) {
        let pair = [self.round.flipped[0], self.round.flipped[1]];
        let matched = self.round.tiles[pair[0]].symbol() == self.round.tiles[pair[1]].symbol();

        if matched {
            for id in pair {
                self.round.tiles[id].mark_matched();
            }
            self.round.flipped.clear();
            self.round.matched_pairs += 1;
            self.round.combo += 1;
            let points = match_points(self.round.combo);
            self.round.score = self.round.score.saturating_add(points);
            self.events.push(GameEvent::PairMatched {
                pair,
                points,
                combo: self.round.combo,
            });
            debug!("pair {:?} matched for {} (combo {})", pair, points, self.round.combo);
        } else {
            self.round.combo = 0;
            self.round.hide_task = Some(
                self.round
                    .scheduler
                    .schedule_once(TaskKind::HideMismatch { pair }, MISMATCH_DELAY_MS),
            );
            self.events.push(GameEvent::PairMismatched { pair });
            debug!("pair {:?} mismatched", pair);
        }
        self.events.push(GameEvent::StatsChanged);

        let turn = TurnOutcome {
            matched,
            moves: self.round.moves,
            matched_pairs: self.round.matched_pairs,
            combo: self.round.combo,
            flip_gap_ms,
        };
        for id in achievements::evaluate(&mut self.round.achievements, &turn) {
            debug!("achievement earned: {}", id.name());
            self.events.push(GameEvent::AchievementEarned(id));
        }

        if self.round.matched_pairs == self.config().pair_count {
            self.finish(RoundOutcome::Win);
        }
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        if self.round.is_finished() {
            return;
        }
        self.round.scheduler.cancel_all();
        self.round.clock_task = None;
        self.round.hide_task = None;

        let config = self.config();
        let base_score = self.round.score;
        let grade = grade_round(config, base_score, self.round.elapsed_secs, self.round.moves);
        self.round.score = grade.final_score;

        let summary = RoundSummary {
            outcome,
            difficulty: self.difficulty,
            base_score,
            time_bonus: grade.time_bonus,
            final_score: grade.final_score,
            moves: self.round.moves,
            elapsed_secs: self.round.elapsed_secs,
            matched_pairs: self.round.matched_pairs,
            pair_count: config.pair_count,
            stars: grade.stars,
        };
        info!(
            "round {} ended: {} score={} stars={} moves={} time={}",
            self.round_id,
            outcome.as_str(),
            summary.final_score,
            summary.stars,
            summary.moves,
            format_clock(summary.elapsed_secs)
        );
        self.round.summary = Some(summary.clone());
        self.events.push(GameEvent::StatsChanged);
        self.events.push(GameEvent::RoundEnded(summary));
    }
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new(DifficultyId::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Easy deck laid out as pairs side by side: 0-1, 2-3, 4-5, ...
    fn easy_game() -> MemoryGame {
        MemoryGame::with_symbols(DifficultyId::Easy, &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5])
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = MemoryGame::new(DifficultyId::Medium);
        assert_eq!(game.tiles().len(), 24);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert_eq!(game.moves(), 0);
        assert!(!game.started());
        assert!(!game.round().clock_running());
    }

    #[test]
    fn test_first_flip_starts_clock() {
        let mut game = easy_game();
        assert!(game.request_flip(0));
        assert!(game.started());
        assert!(game.round().clock_running());
        assert_eq!(game.phase(), TurnPhase::OneFlipped);
        assert_eq!(game.moves(), 0);

        let events = game.take_events();
        assert_eq!(events[0], GameEvent::RoundStarted);
        assert_eq!(
            events[1],
            GameEvent::TileFlipped {
                tile: 0,
                symbol: Symbol(0)
            }
        );
    }

    #[test]
    fn test_match_scores_and_clears_selection() {
        let mut game = easy_game();
        game.request_flip(0);
        game.request_flip(1);

        assert!(game.tile(0).unwrap().is_matched());
        assert!(game.tile(1).unwrap().is_matched());
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.combo(), 1);
        assert_eq!(game.score(), 150);
        assert_eq!(game.moves(), 1);
        assert!(game.flipped().is_empty());
    }

    #[test]
    fn test_combo_grows_and_resets() {
        let mut game = easy_game();
        game.request_flip(0);
        game.request_flip(1);
        game.request_flip(2);
        game.request_flip(3);
        assert_eq!(game.combo(), 2);
        assert_eq!(game.score(), 150 + 200);

        game.request_flip(4);
        game.request_flip(6);
        assert_eq!(game.combo(), 0);
        assert_eq!(game.score(), 350);
    }

    #[test]
    fn test_flip_rejected_for_face_up_matched_or_unknown() {
        let mut game = easy_game();
        game.request_flip(0);
        assert!(!game.request_flip(0));
        game.request_flip(1);
        assert!(!game.request_flip(1));
        assert!(!game.request_flip(99));
    }

    #[test]
    fn test_mismatch_hides_after_delay() {
        let mut game = easy_game();
        game.request_flip(0);
        game.request_flip(2);
        assert_eq!(game.phase(), TurnPhase::Resolving);
        assert!(game.round().hide_pending());

        game.tick(MISMATCH_DELAY_MS - 1);
        assert!(!game.request_flip(4));
        assert_eq!(game.flipped(), &[0, 2]);

        game.tick(1);
        assert!(game.flipped().is_empty());
        assert!(!game.tile(0).unwrap().is_flipped());
        assert!(!game.tile(2).unwrap().is_flipped());
        assert!(game.request_flip(4));
    }

    #[test]
    fn test_clock_counts_whole_seconds() {
        let mut game = easy_game();
        game.tick(5000);
        assert_eq!(game.elapsed_secs(), 0, "clock idle before first flip");

        game.request_flip(0);
        for _ in 0..10 {
            game.tick(250);
        }
        assert_eq!(game.elapsed_secs(), 2);
    }

    #[test]
    fn test_timeout_ends_round() {
        let mut game = easy_game();
        game.request_flip(0);
        game.request_flip(1);
        game.tick(60_000);

        assert!(game.is_finished());
        let summary = game.summary().unwrap();
        assert_eq!(summary.outcome, RoundOutcome::Timeout);
        assert_eq!(summary.elapsed_secs, 60);
        assert_eq!(summary.time_bonus, 0);
        assert_eq!(summary.final_score, 150);
        assert!(!game.round().clock_running());

        game.tick(10_000);
        assert_eq!(game.elapsed_secs(), 60);
    }

    #[test]
    fn test_timeout_cancels_pending_hide() {
        let mut game = easy_game();
        game.request_flip(0);
        game.tick(59_500);
        game.request_flip(2);
        assert!(game.round().hide_pending());

        game.tick(500);
        assert!(game.is_finished());
        assert_eq!(game.round().scheduler().pending(), 0);
        let hidden = game
            .take_events()
            .into_iter()
            .any(|e| matches!(e, GameEvent::TilesHidden { .. }));
        assert!(!hidden);
    }

    #[test]
    fn test_win_grades_round() {
        let mut game = easy_game();
        game.request_flip(0);
        for pair in 0..6 {
            if pair > 0 {
                game.request_flip(pair * 2);
            }
            game.tick(1000);
            game.request_flip(pair * 2 + 1);
        }

        assert!(game.is_finished());
        let summary = game.summary().unwrap().clone();
        assert_eq!(summary.outcome, RoundOutcome::Win);
        assert_eq!(summary.moves, 6);
        assert_eq!(summary.elapsed_secs, 6);
        // combos 1..=6: 150+200+250+300+350+400
        assert_eq!(summary.base_score, 1650);
        assert_eq!(summary.time_bonus, 540);
        assert_eq!(summary.final_score, 2190);
        assert_eq!(game.score(), 2190);
        assert_eq!(summary.stars, 3);
    }

    #[test]
    fn test_finished_round_ignores_flips() {
        let mut game = easy_game();
        game.request_flip(0);
        game.tick(60_000);
        assert!(game.is_finished());
        assert!(!game.request_flip(3));
    }

    #[test]
    fn test_restart_replaces_round() {
        let mut game = easy_game();
        game.request_flip(0);
        game.request_flip(1);
        game.request_flip(2);
        game.request_flip(4);
        assert!(!game.achievements().is_empty());

        game.restart();
        assert_eq!(game.round_id(), 1);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.score(), 0);
        assert!(game.achievements().is_empty());
        assert!(game.flipped().is_empty());
        assert!(!game.round().clock_running());
        assert_eq!(game.round().scheduler().pending(), 0);
        assert!(game.tiles().iter().all(|t| !t.is_face_up()));
    }

    #[test]
    fn test_set_difficulty_resizes_deck() {
        let mut game = easy_game();
        game.set_difficulty(DifficultyId::Hard);
        assert_eq!(game.difficulty(), DifficultyId::Hard);
        assert_eq!(game.tiles().len(), 36);
        assert!(matches!(
            game.take_events().last(),
            Some(GameEvent::RoundReset {
                difficulty: DifficultyId::Hard
            })
        ));
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut game = easy_game();
        assert!(game.apply_action(GameAction::Flip(0)));
        assert!(!game.apply_action(GameAction::Flip(0)));
        assert!(game.apply_action(GameAction::SetDifficulty(DifficultyId::Medium)));
        assert_eq!(game.tiles().len(), 24);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exactly twice")]
    fn test_prepared_deck_rejects_unpaired_symbols() {
        MemoryGame::with_symbols(DifficultyId::Easy, &[0, 0, 0, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_prepared_deck_must_fill_the_grid() {
        MemoryGame::with_symbols(DifficultyId::Easy, &[0, 0, 1, 1]);
    }
}
