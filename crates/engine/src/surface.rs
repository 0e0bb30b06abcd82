use crate::core::{GameSnapshot, RoundSummary};
use crate::store::ScoreEntry;
use crate::types::AchievementId;

/// Whatever shows the game to the player.
///
/// The session calls these after each processed command. Implementations
/// only draw; they never change game state themselves.
pub trait PresentationSurface {
    /// Tiles, moves, clock and score changed.
    fn render_board(&mut self, snapshot: &GameSnapshot);

    /// A newly earned achievement; shown once, transiently.
    fn show_achievement(&mut self, achievement: AchievementId);

    /// End-of-round overlay.
    fn show_summary(&mut self, summary: &RoundSummary);

    /// A new round replaced the finished one.
    fn hide_summary(&mut self) {}

    fn render_leaderboard(&mut self, entries: &[ScoreEntry]);
}

/// Surface that records every call. Handy for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub boards: Vec<GameSnapshot>,
    pub achievements: Vec<AchievementId>,
    pub summaries: Vec<RoundSummary>,
    pub leaderboards: Vec<Vec<ScoreEntry>>,
    pub summary_hidden: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_board(&self) -> Option<&GameSnapshot> {
        self.boards.last()
    }

    pub fn last_leaderboard(&self) -> Option<&[ScoreEntry]> {
        self.leaderboards.last().map(Vec::as_slice)
    }
}

impl PresentationSurface for RecordingSurface {
    fn render_board(&mut self, snapshot: &GameSnapshot) {
        self.boards.push(snapshot.clone());
    }

    fn show_achievement(&mut self, achievement: AchievementId) {
        self.achievements.push(achievement);
    }

    fn show_summary(&mut self, summary: &RoundSummary) {
        self.summaries.push(summary.clone());
    }

    fn hide_summary(&mut self) {
        self.summary_hidden += 1;
    }

    fn render_leaderboard(&mut self, entries: &[ScoreEntry]) {
        self.leaderboards.push(entries.to_vec());
    }
}
