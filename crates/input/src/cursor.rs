//! Grid cursor: which tile a "select" lands on.

use crate::types::{DifficultyId, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Cursor over a row-major grid of `tiles` cells, `columns` wide.
///
/// Movement wraps around within a row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: TileId,
    columns: usize,
    tiles: usize,
}

impl Cursor {
    pub fn new(columns: usize, tiles: usize) -> Self {
        Self {
            index: 0,
            columns: columns.max(1),
            tiles,
        }
    }

    pub fn for_difficulty(difficulty: DifficultyId) -> Self {
        Self::new(difficulty.grid_columns(), difficulty.config().tile_count())
    }

    pub fn index(&self) -> TileId {
        self.index
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.tiles.div_ceil(self.columns)
    }

    pub fn position(&self) -> (usize, usize) {
        (self.index % self.columns, self.index / self.columns)
    }

    pub fn move_by(&mut self, direction: Direction) {
        if self.tiles == 0 {
            return;
        }
        let (x, y) = self.position();
        let rows = self.rows();
        let row_len = |row: usize| (self.tiles - row * self.columns).min(self.columns);

        let (nx, ny) = match direction {
            Direction::Left => ((x + row_len(y) - 1) % row_len(y), y),
            Direction::Right => ((x + 1) % row_len(y), y),
            Direction::Up => (x, (y + rows - 1) % rows),
            Direction::Down => (x, (y + 1) % rows),
        };
        // A short last row may not reach column `nx`.
        let ny = if nx >= row_len(ny) { ny.saturating_sub(1) } else { ny };
        self.index = ny * self.columns + nx;
    }
}
