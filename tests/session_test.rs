use memory_match::core::MemoryGame;
use memory_match::engine::{RecordingSurface, Session};
use memory_match::input::{Direction, InputAction};
use memory_match::store::{KeyedScoreStore, MemoryStorage, ScoreStore};
use memory_match::types::{AchievementId, DifficultyId, RoundOutcome};
use memory_match::App;

fn paired_easy() -> MemoryGame {
    MemoryGame::with_symbols(DifficultyId::Easy, &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5])
}

fn fixed_time() -> String {
    "2026-10-18T12:00:00.000Z".to_string()
}

#[test]
fn a_won_round_reaches_the_leaderboard() {
    let store = KeyedScoreStore::new(MemoryStorage::new());
    let mut session = Session::with_game(paired_easy(), store).with_timestamp(fixed_time);
    let mut surface = RecordingSurface::new();

    for pair in 0..6 {
        session.flip(pair * 2);
        session.flip(pair * 2 + 1);
        session.tick(500);
    }
    session.process(&mut surface);

    assert_eq!(surface.summaries.len(), 1);
    let summary = &surface.summaries[0];
    assert_eq!(summary.outcome, RoundOutcome::Win);
    assert_eq!(summary.elapsed_secs, 2);
    assert_eq!(
        summary.text(),
        format!(
            "You completed the game in 0:02 with 6 moves! Final score: {}",
            summary.final_score
        )
    );

    // 150 + 200 + 250 + 300 + 350 + 400 plus 58 seconds left.
    assert_eq!(summary.final_score, 1650 + 580);
    assert_eq!(
        surface.achievements,
        vec![
            AchievementId::SpeedMatch,
            AchievementId::CleanOpener,
            AchievementId::StreakBonus
        ]
    );

    let board = session.store().load_top();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].score, 2230);
    assert_eq!(board[0].moves, 6);
    assert_eq!(board[0].timestamp, "2026-10-18T12:00:00.000Z");
    assert_eq!(surface.last_leaderboard(), Some(board.as_slice()));
}

#[test]
fn app_select_flips_under_cursor_and_plays_again() {
    let mut app = App::with_game(paired_easy(), KeyedScoreStore::new(MemoryStorage::new()));

    app.handle_input(InputAction::Select);
    app.handle_input(InputAction::Move(Direction::Right));
    app.handle_input(InputAction::Select);
    assert_eq!(app.session().game().matched_pairs(), 1);

    app.tick(60_000);
    assert!(app.surface().summary().is_some());
    assert_eq!(app.surface().leaderboard().len(), 1);

    // Cursor keys do nothing while the overlay is open; select starts over.
    app.handle_input(InputAction::Move(Direction::Down));
    assert_eq!(app.surface().cursor().index(), 1);
    app.handle_input(InputAction::Select);
    assert!(app.surface().summary().is_none());
    assert_eq!(app.session().game().moves(), 0);
    assert_eq!(app.session().game().round_id(), 1);
}
