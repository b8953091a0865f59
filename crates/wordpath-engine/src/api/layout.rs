use glam::Vec2;

use crate::core::grid::GridPos;

/// Maps world coordinates to grid cells and back.
///
/// The grid's top-left corner sits at `origin`; rows grow downward (+y) and
/// columns grow rightward (+x).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub origin: Vec2,
    pub tile_size: f32,
    pub rows: usize,
    pub cols: usize,
}

impl BoardLayout {
    pub fn new(rows: usize, cols: usize, tile_size: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            tile_size,
            rows,
            cols,
        }
    }

    /// Set the world-space origin (top-left corner).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Convert a world position to the cell under it.
    pub fn world_to_cell(&self, world_pos: Vec2) -> Option<GridPos> {
        if self.tile_size <= 0.0 {
            return None;
        }
        let local = (world_pos - self.origin) / self.tile_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let col = local.x.floor() as usize;
        let row = local.y.floor() as usize;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(GridPos::new(row, col))
    }

    /// World position of a cell's center.
    pub fn cell_center(&self, pos: GridPos) -> Vec2 {
        let half = self.tile_size / 2.0;
        self.origin
            + Vec2::new(
                pos.col as f32 * self.tile_size + half,
                pos.row as f32 * self.tile_size + half,
            )
    }

    /// World-space bounds of the board.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let max = self.origin
            + Vec2::new(
                self.cols as f32 * self.tile_size,
                self.rows as f32 * self.tile_size,
            );
        (self.origin, max)
    }
}
