use memory_match::core::MemoryGame;
use memory_match::store::ScoreEntry;
use memory_match::term::{symbol_glyph, FrameBuffer, GameView, ViewState, Viewport};
use memory_match::types::{AchievementId, DifficultyId, Symbol};

fn paired_easy() -> MemoryGame {
    MemoryGame::with_symbols(DifficultyId::Easy, &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5])
}

fn count(fb: &FrameBuffer, ch: char) -> usize {
    fb.cells().iter().filter(|c| c.ch == ch).count()
}

#[test]
fn face_down_tiles_show_question_marks() {
    let snap = paired_easy().snapshot();
    let fb = GameView::default().render(&snap, &ViewState::default(), Viewport::new(80, 24));
    assert_eq!(count(&fb, '?'), 12);
}

#[test]
fn board_frame_corners_follow_the_grid() {
    let snap = paired_easy().snapshot();
    let view = GameView::default();
    let (w, h) = view.frame_size(&snap);

    // Viewport exactly the frame plus HUD and toast space: frame sits at (0, 0).
    let fb = view.render(&snap, &ViewState::default(), Viewport::new(w + 24, h + 2));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(w - 1, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, h - 1).unwrap().ch, '└');
    assert_eq!(fb.get(w - 1, h - 1).unwrap().ch, '┘');
}

#[test]
fn flipped_and_matched_tiles_show_glyphs() {
    let mut game = paired_easy();
    game.request_flip(0);
    game.request_flip(1);
    game.request_flip(2);
    let snap = game.snapshot();

    let fb = GameView::default().render(&snap, &ViewState::default(), Viewport::new(80, 24));
    assert_eq!(count(&fb, '?'), 9);
    assert_eq!(count(&fb, symbol_glyph(Symbol(0))), 2);
    assert_eq!(count(&fb, symbol_glyph(Symbol(1))), 1);

    let matched = fb
        .cells()
        .iter()
        .find(|c| c.ch == symbol_glyph(Symbol(0)))
        .unwrap();
    assert!(matched.style.dim);
}

#[test]
fn hud_shows_round_stats() {
    let mut game = paired_easy();
    game.request_flip(0);
    game.request_flip(1);
    game.tick(65_000);
    let mut snap = game.snapshot();
    snap.summary = None;

    let fb = GameView::default().render(&snap, &ViewState::default(), Viewport::new(80, 24));
    let text = fb.text();
    for label in ["DIFFICULTY", "MOVES", "TIME", "SCORE", "COMBO", "PAIRS"] {
        assert!(text.contains(label), "missing {label}");
    }
    assert!(text.contains("easy"));
    assert!(text.contains("1:00/1:00"));
    assert!(text.contains("1/6"));
}

#[test]
fn cursor_toast_and_summary_overlay() {
    let mut game = paired_easy();
    game.request_flip(0);
    game.request_flip(1);
    game.tick(60_000);
    let snap = game.snapshot();
    let summary = snap.summary.clone().unwrap();
    let leaderboard = vec![
        ScoreEntry::new(2230, DifficultyId::Easy, 6, 2, "a"),
        ScoreEntry::new(150, DifficultyId::Easy, 1, 60, "b"),
    ];

    let view = GameView::default();
    let state = ViewState {
        cursor: Some(3),
        toast: Some(AchievementId::CleanOpener),
        summary: None,
        leaderboard: &leaderboard,
    };
    let text = view.render(&snap, &state, Viewport::new(100, 30)).text();
    assert!(text.contains("[ ? ]"));
    assert!(text.contains("* Clean Opener: Find the first pair without a mistake"));
    assert!(text.contains("#1 easy  2230 pts"));

    let state = ViewState {
        summary: Some(&summary),
        ..state
    };
    let text = view.render(&snap, &state, Viewport::new(100, 30)).text();
    assert!(text.contains("TIME'S UP"));
    assert!(text.contains(&summary.text()));
    assert!(text.contains("#2 easy  150 pts"));
}
