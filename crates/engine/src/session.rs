//! Session: serializes player input and time into the engine.
//!
//! Commands are queued and processed strictly one at a time. Each command
//! runs to completion (including any tasks that come due during a tick)
//! before the next one is looked at, and its events are dispatched to the
//! presentation surface before moving on.

use std::collections::VecDeque;

use chrono::{SecondsFormat, Utc};
use log::{debug, info};

use crate::core::{GameEvent, GameSnapshot, MemoryGame, RoundSummary};
use crate::store::{ScoreEntry, ScoreStore};
use crate::surface::PresentationSurface;
use crate::types::{DifficultyId, GameAction, TileId};

/// One unit of work for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Action(GameAction),
    /// Advance round time by this many milliseconds.
    Tick(u32),
}

/// Produces the ISO-8601 timestamp stamped on submitted results.
pub type TimestampFn = fn() -> String;

/// Current UTC time, RFC 3339 with milliseconds (`2026-10-18T09:30:00.000Z`).
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct Session<S> {
    game: MemoryGame,
    store: S,
    queue: VecDeque<SessionCommand>,
    snapshot: GameSnapshot,
    leaderboard: Vec<ScoreEntry>,
    last_result: Option<ScoreEntry>,
    timestamp: TimestampFn,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(difficulty: DifficultyId, store: S) -> Self {
        Self::with_game(MemoryGame::new(difficulty), store)
    }

    /// Wrap an existing game (e.g. one dealt from a fixed deck).
    pub fn with_game(game: MemoryGame, store: S) -> Self {
        let leaderboard = store.load_top();
        debug!("loaded {} leaderboard entries", leaderboard.len());
        let snapshot = game.snapshot();
        Self {
            game,
            store,
            queue: VecDeque::new(),
            snapshot,
            leaderboard,
            last_result: None,
            timestamp: utc_timestamp,
        }
    }

    pub fn with_timestamp(mut self, timestamp: TimestampFn) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn game(&self) -> &MemoryGame {
        &self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn leaderboard(&self) -> &[ScoreEntry] {
        &self.leaderboard
    }

    /// Result submitted for the most recent finished round.
    pub fn last_result(&self) -> Option<&ScoreEntry> {
        self.last_result.as_ref()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn push(&mut self, command: SessionCommand) {
        self.queue.push_back(command);
    }

    pub fn flip(&mut self, tile: TileId) {
        self.push(SessionCommand::Action(GameAction::Flip(tile)));
    }

    pub fn restart(&mut self) {
        self.push(SessionCommand::Action(GameAction::Restart));
    }

    pub fn set_difficulty(&mut self, difficulty: DifficultyId) {
        self.push(SessionCommand::Action(GameAction::SetDifficulty(difficulty)));
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.push(SessionCommand::Tick(elapsed_ms));
    }

    /// Initial paint: board and stored leaderboard.
    pub fn present(&mut self, surface: &mut impl PresentationSurface) {
        self.game.snapshot_into(&mut self.snapshot);
        surface.render_board(&self.snapshot);
        surface.render_leaderboard(&self.leaderboard);
    }

    /// Process every queued command in order. Returns how many ran.
    pub fn process(&mut self, surface: &mut impl PresentationSurface) -> usize {
        let mut processed = 0;
        while let Some(command) = self.queue.pop_front() {
            self.execute(command);
            self.dispatch(surface);
            processed += 1;
        }
        processed
    }

    fn execute(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Action(action) => {
                if !self.game.apply_action(action) {
                    debug!("ignored {}", action);
                }
            }
            SessionCommand::Tick(ms) => self.game.tick(ms),
        }
    }

    fn dispatch(&mut self, surface: &mut impl PresentationSurface) {
        let events = self.game.take_events();
        if events.is_empty() {
            return;
        }

        self.game.snapshot_into(&mut self.snapshot);
        surface.render_board(&self.snapshot);

        for event in events {
            match event {
                GameEvent::AchievementEarned(id) => surface.show_achievement(id),
                GameEvent::RoundEnded(summary) => {
                    self.record(&summary);
                    surface.show_summary(&summary);
                    surface.render_leaderboard(&self.leaderboard);
                }
                GameEvent::RoundReset { .. } => surface.hide_summary(),
                _ => {}
            }
        }
    }

    fn record(&mut self, summary: &RoundSummary) {
        let entry = ScoreEntry::new(
            summary.final_score,
            summary.difficulty,
            summary.moves,
            summary.elapsed_secs,
            (self.timestamp)(),
        );
        info!(
            "submitting {} pts ({}, {} moves, {}s)",
            entry.score, entry.difficulty, entry.moves, entry.elapsed_secs
        );
        self.leaderboard = self.store.submit(entry.clone());
        self.last_result = Some(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyedScoreStore, MemoryStorage};
    use crate::surface::RecordingSurface;
    use crate::types::{AchievementId, RoundOutcome};

    fn fixed_time() -> String {
        "2026-10-18T00:00:00.000Z".to_string()
    }

    fn session() -> Session<KeyedScoreStore<MemoryStorage>> {
        let game = MemoryGame::with_symbols(DifficultyId::Easy, &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
        Session::with_game(game, KeyedScoreStore::new(MemoryStorage::new())).with_timestamp(fixed_time)
    }

    #[test]
    fn test_commands_run_in_order() {
        let mut s = session();
        let mut surface = RecordingSurface::new();
        s.flip(0);
        s.flip(1);
        s.flip(1);
        assert_eq!(s.pending(), 3);

        assert_eq!(s.process(&mut surface), 3);
        assert_eq!(s.pending(), 0);
        assert_eq!(s.game().score(), 150);
        // The rejected third flip emits nothing, so only two renders.
        assert_eq!(surface.boards.len(), 2);
        assert_eq!(
            surface.achievements,
            vec![AchievementId::SpeedMatch, AchievementId::CleanOpener]
        );
    }

    #[test]
    fn test_finished_round_is_submitted_once() {
        let mut s = session();
        let mut surface = RecordingSurface::new();
        s.flip(0);
        s.tick(60_000);
        s.tick(5_000);
        s.process(&mut surface);

        assert_eq!(surface.summaries.len(), 1);
        assert_eq!(surface.summaries[0].outcome, RoundOutcome::Timeout);
        assert_eq!(s.leaderboard().len(), 1);
        assert_eq!(surface.last_leaderboard().unwrap().len(), 1);

        let result = s.last_result().unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.elapsed_secs, 60);
        assert_eq!(result.timestamp, "2026-10-18T00:00:00.000Z");
    }

    #[test]
    fn test_restart_hides_summary() {
        let mut s = session();
        let mut surface = RecordingSurface::new();
        s.flip(0);
        s.tick(60_000);
        s.restart();
        s.process(&mut surface);

        assert_eq!(surface.summary_hidden, 1);
        assert!(!s.snapshot().finished());
        assert_eq!(s.snapshot().moves, 0);
    }

    #[test]
    fn test_present_paints_board_and_leaderboard() {
        let mut s = session();
        let mut surface = RecordingSurface::new();
        s.present(&mut surface);
        assert_eq!(surface.boards.len(), 1);
        assert_eq!(surface.leaderboards, vec![Vec::<ScoreEntry>::new()]);
    }

    #[test]
    fn test_utc_timestamp_shape() {
        let ts = utc_timestamp();
        assert_eq!(ts.len(), "2026-10-18T09:30:00.000Z".len());
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[10..11], "T");
    }
}
