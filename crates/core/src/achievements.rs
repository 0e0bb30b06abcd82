//! Achievement tracking for a single round.
//!
//! The earned set only grows while a round is live; a new round starts with
//! an empty set. Evaluation reports each achievement at most once.

use arrayvec::ArrayVec;

use crate::types::{AchievementId, SPEED_MATCH_WINDOW_MS, STREAK_BONUS_COMBO};

/// Set of earned achievements (bit set keyed by [`AchievementId::bit`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AchievementSet {
    earned: u8,
}

impl AchievementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.earned & id.bit() != 0
    }

    /// Returns true if `id` was not earned before.
    pub fn insert(&mut self, id: AchievementId) -> bool {
        let newly = !self.contains(id);
        self.earned |= id.bit();
        newly
    }

    pub fn is_empty(&self) -> bool {
        self.earned == 0
    }

    pub fn len(&self) -> usize {
        self.earned.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = AchievementId> + '_ {
        AchievementId::ALL.into_iter().filter(|id| self.contains(*id))
    }
}

/// Facts about the turn that just resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub matched: bool,
    /// Completed two-tile turns so far, this one included.
    pub moves: u32,
    pub matched_pairs: u32,
    pub combo: u32,
    /// Time between the previous flip and the flip that completed this turn.
    /// `None` when there was no previous flip to measure from.
    pub flip_gap_ms: Option<u64>,
}

/// Evaluate every achievement against a resolved turn.
///
/// Newly earned achievements are added to `earned` and returned in catalog order.
pub fn evaluate(earned: &mut AchievementSet, turn: &TurnOutcome) -> ArrayVec<AchievementId, 3> {
    let mut unlocked = ArrayVec::new();

    for id in AchievementId::ALL {
        if earned.contains(id) || !qualifies(id, turn) {
            continue;
        }
        earned.insert(id);
        unlocked.push(id);
    }

    unlocked
}

/// Speed Match needs an actual match; a quick mismatch does not count.
fn qualifies(id: AchievementId, turn: &TurnOutcome) -> bool {
    match id {
        AchievementId::SpeedMatch => {
            turn.matched && turn.flip_gap_ms.is_some_and(|gap| gap < SPEED_MATCH_WINDOW_MS)
        }
        AchievementId::CleanOpener => turn.matched_pairs == 1 && turn.moves == 1,
        AchievementId::StreakBonus => turn.combo >= STREAK_BONUS_COMBO,
    }
}
