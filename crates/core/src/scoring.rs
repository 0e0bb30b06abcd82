//! Scoring module - match points, time bonus and star grading
//!
//! - A match scores `floor(100 * (1 + combo * 0.5))` with the combo value
//!   *after* it was incremented for this match, so a fresh streak scores 150.
//! - The time bonus is 10 points per second left on the clock (never negative).
//! - Stars compare elapsed time and moves against the difficulty: both the
//!   time and the move condition must hold for a tier.
//!
//! All arithmetic stays in integers; the fractional thresholds are
//! cross-multiplied.

use crate::types::{Difficulty, MATCH_BASE_POINTS, TIME_BONUS_PER_SECOND};

/// End-of-round grading result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GradeResult {
    pub time_bonus: u32,
    /// Running score plus `time_bonus`.
    pub final_score: u32,
    /// 1 to 3.
    pub stars: u8,
}

/// Points for a match at the given (post-increment) combo.
pub fn match_points(combo: u32) -> u32 {
    // 100 * (1 + c/2) == 100 + 50c, exact for every integer c.
    MATCH_BASE_POINTS.saturating_add(MATCH_BASE_POINTS.saturating_mul(combo) / 2)
}

/// Bonus for seconds left on the clock.
pub fn time_bonus(difficulty: Difficulty, elapsed_secs: u32) -> u32 {
    difficulty
        .time_limit_secs
        .saturating_sub(elapsed_secs)
        .saturating_mul(TIME_BONUS_PER_SECOND)
}

/// Star rating from elapsed time and moves.
///
/// With move budget `B = pair_count * 2.5`:
/// - 3 stars: elapsed <= 50% of the limit and moves <= 60% of B
/// - 2 stars: elapsed <= 75% of the limit and moves <= 80% of B
/// - 1 star otherwise
pub fn star_rating(difficulty: Difficulty, elapsed_secs: u32, moves: u32) -> u8 {
    let limit = difficulty.time_limit_secs as u64;
    let elapsed = elapsed_secs as u64;
    // moves <= pct% of (budget_x2 / 2)  <=>  200 * moves <= pct * budget_x2
    let moves_scaled = 200 * moves as u64;
    let budget_x2 = difficulty.move_budget_x2() as u64;

    if 2 * elapsed <= limit && moves_scaled <= 60 * budget_x2 {
        return 3;
    }
    if 4 * elapsed <= 3 * limit && moves_scaled <= 80 * budget_x2 {
        return 2;
    }
    1
}

/// Grade a finished round.
pub fn grade_round(difficulty: Difficulty, score: u32, elapsed_secs: u32, moves: u32) -> GradeResult {
    let time_bonus = time_bonus(difficulty, elapsed_secs);
    GradeResult {
        time_bonus,
        final_score: score.saturating_add(time_bonus),
        stars: star_rating(difficulty, elapsed_secs, moves),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DifficultyId;

    #[test]
    fn test_match_points_by_combo() {
        assert_eq!(match_points(1), 150);
        assert_eq!(match_points(2), 200);
        assert_eq!(match_points(3), 250);
        assert_eq!(match_points(0), 100);
    }

    #[test]
    fn test_time_bonus_clamps_at_zero() {
        let easy = DifficultyId::Easy.config();
        assert_eq!(time_bonus(easy, 0), 600);
        assert_eq!(time_bonus(easy, 45), 150);
        assert_eq!(time_bonus(easy, 60), 0);
        assert_eq!(time_bonus(easy, 75), 0);
    }

    #[test]
    fn test_star_rating_easy_examples() {
        let easy = DifficultyId::Easy.config();
        assert_eq!(star_rating(easy, 25, 8), 3);
        assert_eq!(star_rating(easy, 40, 11), 2);
        assert_eq!(star_rating(easy, 55, 14), 1);
    }

    #[test]
    fn test_star_rating_boundaries_are_inclusive() {
        let easy = DifficultyId::Easy.config();
        // 50% of 60s = 30s, 60% of 15 moves = 9
        assert_eq!(star_rating(easy, 30, 9), 3);
        // 75% of 60s = 45s, 80% of 15 moves = 12
        assert_eq!(star_rating(easy, 45, 12), 2);
        assert_eq!(star_rating(easy, 46, 12), 1);
        assert_eq!(star_rating(easy, 45, 13), 1);
    }

    #[test]
    fn test_star_rating_needs_both_conditions() {
        let easy = DifficultyId::Easy.config();
        // Fast but wasteful drops a tier, and so does efficient but slow.
        assert_eq!(star_rating(easy, 10, 10), 2);
        assert_eq!(star_rating(easy, 35, 6), 2);
    }

    #[test]
    fn test_star_rating_medium_budget() {
        // budget 30 moves: 60% = 18, 80% = 24
        let medium = DifficultyId::Medium.config();
        assert_eq!(star_rating(medium, 60, 18), 3);
        assert_eq!(star_rating(medium, 60, 19), 2);
        assert_eq!(star_rating(medium, 90, 24), 2);
        assert_eq!(star_rating(medium, 90, 25), 1);
    }

    #[test]
    fn test_grade_round_adds_bonus() {
        let easy = DifficultyId::Easy.config();
        let grade = grade_round(easy, 900, 25, 8);
        assert_eq!(grade.time_bonus, 350);
        assert_eq!(grade.final_score, 1250);
        assert_eq!(grade.stars, 3);
    }
}
