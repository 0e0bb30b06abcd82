//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, RoundSummary, TileSnapshot};
use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::store::ScoreEntry;
use crate::types::{format_clock, AchievementId, RoundOutcome, Symbol, TileId, MAX_PAIRS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Presentation-only state layered over the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState<'a> {
    /// Tile under the cursor.
    pub cursor: Option<TileId>,
    /// Achievement toast currently on screen.
    pub toast: Option<AchievementId>,
    /// Open game-over overlay.
    pub summary: Option<&'a RoundSummary>,
    pub leaderboard: &'a [ScoreEntry],
}

// Single-column, text-presentation glyphs only.
const GLYPHS: [char; MAX_PAIRS] = [
    '♠', '♥', '♦', '♣', '★', '●', '▲', '♪', '†', '♫', '■', '♞', '◆', 'Δ', 'λ', 'Ω', '§', '¤',
];

/// Face-up glyph of a symbol.
pub fn symbol_glyph(symbol: Symbol) -> char {
    GLYPHS.get(symbol.index()).copied().unwrap_or('#')
}

/// `* Name: description`
pub fn toast_text(achievement: AchievementId) -> String {
    format!("* {}: {}", achievement.name(), achievement.description())
}

pub fn stars_text(stars: u8) -> String {
    "*".repeat(stars as usize)
}

/// `#n difficulty  score pts`, ranks starting at 1.
pub fn leaderboard_line(rank: usize, entry: &ScoreEntry) -> String {
    format!("#{} {}  {} pts", rank, entry.difficulty, entry.score)
}

const BOARD_BG: Rgb = Rgb::new(24, 26, 36);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

fn border_style() -> CellStyle {
    CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG)
}

fn label_style() -> CellStyle {
    CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold()
}

fn value_style() -> CellStyle {
    CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG)
}

fn tile_style(tile: &TileSnapshot) -> CellStyle {
    if tile.matched {
        CellStyle::plain(Rgb::new(90, 200, 110), Rgb::new(20, 50, 30)).dim()
    } else if tile.flipped {
        CellStyle::plain(Rgb::new(250, 230, 120), Rgb::new(70, 60, 30)).bold()
    } else {
        CellStyle::plain(Rgb::new(150, 160, 200), Rgb::new(45, 50, 80))
    }
}

/// Lays out the board grid, HUD panel, toast line and summary overlay.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    /// Blank columns/rows between tiles and around the grid.
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            tile_w: 5,
            tile_h: 1,
            gap: 1,
        }
    }
}

impl GameView {
    /// Outer size (border included) of the board frame for a snapshot.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let cols = snap.difficulty.grid_columns() as u16;
        let rows = (snap.tiles.len() as u16).div_ceil(cols.max(1));
        let inner_w = cols * self.tile_w + (cols + 1) * self.gap;
        let inner_h = rows * self.tile_h + (rows + 1) * self.gap;
        (inner_w + 2, inner_h + 2)
    }

    /// Top-left corner of tile `id` relative to the frame origin.
    pub fn tile_origin(&self, snap: &GameSnapshot, id: TileId) -> (u16, u16) {
        let cols = snap.difficulty.grid_columns();
        let (cx, cy) = ((id % cols) as u16, (id / cols) as u16);
        (
            1 + self.gap + cx * (self.tile_w + self.gap),
            1 + self.gap + cy * (self.tile_h + self.gap),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        state: &ViewState<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w + HUD_WIDTH) / 2;
        let start_y = viewport.height.saturating_sub(frame_h + 2) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            CellStyle::plain(BOARD_BG, BOARD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border_style());

        for tile in &snap.tiles {
            let (ox, oy) = self.tile_origin(snap, tile.id);
            self.draw_tile(fb, start_x + ox, start_y + oy, tile, state.cursor == Some(tile.id));
        }

        let panel_x = start_x + frame_w + 2;
        self.draw_hud(fb, snap, state, panel_x, start_y, viewport);

        if let Some(achievement) = state.toast {
            let style = CellStyle::plain(Rgb::new(255, 215, 0), PANEL_BG).bold();
            fb.put_str(start_x, start_y + frame_h + 1, &toast_text(achievement), style);
        }

        if let Some(summary) = state.summary {
            draw_summary(fb, summary, state.leaderboard, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, state: &ViewState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, state, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, tile: &TileSnapshot, selected: bool) {
        let style = tile_style(tile);
        fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', style);

        let glyph = if tile.face_up() {
            symbol_glyph(tile.symbol)
        } else {
            '?'
        };
        let mid_y = y + self.tile_h / 2;
        fb.put_char(x + self.tile_w / 2, mid_y, glyph, style);

        if selected {
            let cursor = CellStyle {
                fg: Rgb::new(255, 255, 255),
                ..style
            }
            .bold();
            fb.put_char(x, mid_y, '[', cursor);
            fb.put_char(x + self.tile_w - 1, mid_y, ']', cursor);
        }
    }

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        state: &ViewState<'_>,
        x: u16,
        y: u16,
        viewport: Viewport,
    ) {
        if x.saturating_add(12) > viewport.width {
            return;
        }
        let label = label_style();
        let value = value_style();
        let mut row = y;

        let vx = hud_label(fb, x, &mut row, "DIFFICULTY");
        fb.put_str(vx, row - 1, snap.difficulty.as_str(), value);
        let vx = hud_label(fb, x, &mut row, "MOVES");
        fb.put_u32(vx, row - 1, snap.moves, value);
        let vx = hud_label(fb, x, &mut row, "TIME");
        let end = fb.put_str(vx, row - 1, &snap.clock(), value);
        fb.put_char(end, row - 1, '/', value.dim());
        fb.put_str(end + 1, row - 1, &format_clock(snap.time_limit_secs), value.dim());
        let vx = hud_label(fb, x, &mut row, "SCORE");
        fb.put_u32(vx, row - 1, snap.score, value);
        let vx = hud_label(fb, x, &mut row, "COMBO");
        fb.put_u32(vx, row - 1, snap.combo, value);
        let vx = hud_label(fb, x, &mut row, "PAIRS");
        let end = fb.put_u32(vx, row - 1, snap.matched_pairs, value);
        fb.put_char(end, row - 1, '/', value);
        fb.put_u32(end + 1, row - 1, snap.pair_count, value);

        row = row.saturating_add(1);
        if state.summary.is_none() && !state.leaderboard.is_empty() {
            fb.put_str(x, row, "LEADERBOARD", label);
            row = row.saturating_add(1);
            for (i, entry) in state.leaderboard.iter().enumerate() {
                if row >= viewport.height {
                    break;
                }
                fb.put_str(x, row, &leaderboard_line(i + 1, entry), value);
                row = row.saturating_add(1);
            }
        }

        let help_row = viewport.height.saturating_sub(1);
        if row < help_row {
            let help = "arrows move  space flip  r restart  1/2/3 level  q quit";
            fb.put_str(0, help_row, help, value.dim());
        }
    }
}

/// Writes a HUD label on `row`, advances it, returns the value column.
fn hud_label(fb: &mut FrameBuffer, x: u16, row: &mut u16, name: &str) -> u16 {
    fb.put_str(x, *row, name, label_style());
    *row = row.saturating_add(1);
    x.saturating_add(HUD_VALUE_COLUMN)
}

/// Offset of HUD values from their labels ("DIFFICULTY" plus a space).
const HUD_VALUE_COLUMN: u16 = 11;

/// Columns reserved to the right of the board for the HUD.
const HUD_WIDTH: u16 = 24;

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered game-over box: title, stars, summary text, leaderboard.
fn draw_summary(fb: &mut FrameBuffer, summary: &RoundSummary, leaderboard: &[ScoreEntry], viewport: Viewport) {
    let title = match summary.outcome {
        RoundOutcome::Win => "YOU WIN",
        RoundOutcome::Timeout => "TIME'S UP",
    };
    let stars = stars_text(summary.stars);
    let text = summary.text();
    let footer = "space: play again   q: quit";

    let mut lines: Vec<(String, CellStyle)> = Vec::with_capacity(8 + leaderboard.len());
    let heading = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let body = value_style();
    lines.push((title.to_string(), heading));
    lines.push((stars, CellStyle::plain(Rgb::new(255, 215, 0), PANEL_BG).bold()));
    lines.push((text, body));
    if !leaderboard.is_empty() {
        lines.push((String::new(), body));
        lines.push(("LEADERBOARD".to_string(), label_style()));
        for (i, entry) in leaderboard.iter().enumerate() {
            lines.push((leaderboard_line(i + 1, entry), body));
        }
    }
    lines.push((String::new(), body));
    lines.push((footer.to_string(), body.dim()));

    let inner_w = lines.iter().map(|(s, _)| text_width(s)).max().unwrap_or(0) + 4;
    let w = inner_w.saturating_add(2).min(viewport.width);
    let h = (lines.len() as u16 + 4).min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    fb.fill_rect(x, y, w, h, ' ', CellStyle::plain(PANEL_BG, PANEL_BG));
    draw_border(fb, x, y, w, h, border_style());
    for (i, (line, style)) in lines.iter().enumerate() {
        let row = y + 2 + i as u16;
        if row + 1 >= y + h {
            break;
        }
        fb.put_str_centered(x + 1, row, w.saturating_sub(2), line, *style);
    }
}
