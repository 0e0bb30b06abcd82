//! Terminal front end: routes key intents into a [`Session`] and keeps what
//! the [`GameView`] needs to draw between frames.

use std::collections::VecDeque;

use log::debug;

use crate::core::{GameSnapshot, MemoryGame, RoundSummary};
use crate::engine::{PresentationSurface, Session};
use crate::input::{Cursor, Direction, InputAction};
use crate::store::{ScoreEntry, ScoreStore};
use crate::term::{FrameBuffer, GameView, ViewState, Viewport};
use crate::types::{AchievementId, DifficultyId, ACHIEVEMENT_TOAST_MS};

/// [`PresentationSurface`] that buffers state for the terminal view.
///
/// Calls from the session only record what changed; painting happens in
/// [`TerminalSurface::compose`] once per frame.
pub struct TerminalSurface {
    view: GameView,
    snapshot: GameSnapshot,
    cursor: Cursor,
    toasts: VecDeque<AchievementId>,
    toast_remaining_ms: u32,
    summary: Option<RoundSummary>,
    leaderboard: Vec<ScoreEntry>,
    dirty: bool,
}

impl TerminalSurface {
    pub fn new(difficulty: DifficultyId) -> Self {
        Self {
            view: GameView::default(),
            snapshot: GameSnapshot::default(),
            cursor: Cursor::for_difficulty(difficulty),
            toasts: VecDeque::new(),
            toast_remaining_ms: 0,
            summary: None,
            leaderboard: Vec::new(),
            dirty: true,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn toast(&self) -> Option<AchievementId> {
        self.toasts.front().copied()
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn leaderboard(&self) -> &[ScoreEntry] {
        &self.leaderboard
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor.move_by(direction);
        self.dirty = true;
    }

    /// Age the current toast; each one stays up for its full duration.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.toasts.is_empty() {
            return;
        }
        let mut left = elapsed_ms;
        while left > 0 && !self.toasts.is_empty() {
            if left < self.toast_remaining_ms {
                self.toast_remaining_ms -= left;
                return;
            }
            left -= self.toast_remaining_ms;
            self.toasts.pop_front();
            self.toast_remaining_ms = if self.toasts.is_empty() {
                0
            } else {
                ACHIEVEMENT_TOAST_MS
            };
            self.dirty = true;
        }
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn compose(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        let state = ViewState {
            cursor: if self.summary.is_none() {
                Some(self.cursor.index())
            } else {
                None
            },
            toast: self.toast(),
            summary: self.summary.as_ref(),
            leaderboard: &self.leaderboard,
        };
        self.view.render_into(&self.snapshot, &state, viewport, fb);
    }
}

impl PresentationSurface for TerminalSurface {
    fn render_board(&mut self, snapshot: &GameSnapshot) {
        if snapshot.difficulty != self.snapshot.difficulty
            || snapshot.tiles.len() != self.snapshot.tiles.len()
        {
            self.cursor = Cursor::for_difficulty(snapshot.difficulty);
        }
        self.snapshot.clone_from(snapshot);
        self.dirty = true;
    }

    fn show_achievement(&mut self, achievement: AchievementId) {
        if self.toasts.is_empty() {
            self.toast_remaining_ms = ACHIEVEMENT_TOAST_MS;
        }
        self.toasts.push_back(achievement);
        self.dirty = true;
    }

    fn show_summary(&mut self, summary: &RoundSummary) {
        self.summary = Some(summary.clone());
        self.dirty = true;
    }

    fn hide_summary(&mut self) {
        self.summary = None;
        self.dirty = true;
    }

    fn render_leaderboard(&mut self, entries: &[ScoreEntry]) {
        self.leaderboard.clear();
        self.leaderboard.extend_from_slice(entries);
        self.dirty = true;
    }
}

/// A session wired to the terminal surface.
pub struct App<S> {
    session: Session<S>,
    surface: TerminalSurface,
}

impl<S: ScoreStore> App<S> {
    pub fn new(difficulty: DifficultyId, store: S) -> Self {
        Self::with_session(Session::new(difficulty, store))
    }

    pub fn with_game(game: MemoryGame, store: S) -> Self {
        Self::with_session(Session::with_game(game, store))
    }

    pub fn with_session(mut session: Session<S>) -> Self {
        let mut surface = TerminalSurface::new(session.game().difficulty());
        session.present(&mut surface);
        Self { session, surface }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn surface(&self) -> &TerminalSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut TerminalSurface {
        &mut self.surface
    }

    pub fn handle_input(&mut self, action: InputAction) {
        match action {
            InputAction::Move(direction) => {
                if self.surface.summary().is_none() {
                    self.surface.move_cursor(direction);
                }
                return;
            }
            InputAction::Select => {
                if self.surface.summary().is_some() {
                    debug!("play again");
                    self.session.restart();
                } else {
                    self.session.flip(self.surface.cursor().index());
                }
            }
            InputAction::Restart => self.session.restart(),
            InputAction::SetDifficulty(difficulty) => self.session.set_difficulty(difficulty),
        }
        self.session.process(&mut self.surface);
    }

    /// Feed wall-clock time to the round and the toast timer.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if elapsed_ms == 0 {
            return;
        }
        self.session.tick(elapsed_ms);
        self.session.process(&mut self.surface);
        self.surface.advance(elapsed_ms);
    }

    pub fn compose(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.surface.compose(viewport, fb);
    }
}
