//! Letter grid for word-path puzzles.
//!
//! Cells are stored in row-major order: index = row * cols + col.
//! Letters are fixed once placed; only the `selected` and `solved` flags
//! change, and only through the selection path and validation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Largest row or column count a generated grid may have.
pub const MAX_GRID_SIDE: usize = 64;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether `other` touches this position under the given adjacency rule.
    /// A position is never adjacent to itself.
    pub fn is_adjacent(&self, other: GridPos, adjacency: Adjacency) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        match adjacency {
            Adjacency::Four => dr + dc == 1,
            Adjacency::Eight => dr.max(dc) == 1,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which neighbours count as adjacent when tracing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    /// Up, down, left, right.
    Four,
    /// Orthogonal plus diagonal.
    #[default]
    Eight,
}

impl Adjacency {
    /// Row/column offsets for this adjacency rule.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        const FOUR: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
        const EIGHT: [(isize, isize); 8] = [
            (-1, -1), (-1, 0), (-1, 1),
            (0, -1),           (0, 1),
            (1, -1),  (1, 0),  (1, 1),
        ];
        match self {
            Adjacency::Four => &FOUR,
            Adjacency::Eight => &EIGHT,
        }
    }
}

/// A single letter tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    letter: char,
    position: GridPos,
    pub(crate) selected: bool,
    pub(crate) solved: bool,
}

impl Cell {
    fn new(letter: char, position: GridPos) -> Self {
        Self {
            letter: canonical_letter(letter),
            position,
            selected: false,
            solved: false,
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

/// Uppercase a letter, keeping single-char mappings only.
fn canonical_letter(letter: char) -> char {
    let mut upper = letter.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => letter,
    }
}

/// Row-major grid of letter cells.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with a placeholder letter.
    pub fn new(rows: usize, cols: usize, fill: char) -> Self {
        let cells = (0..rows * cols)
            .map(|i| Cell::new(fill, GridPos::new(i / cols.max(1), i % cols.max(1))))
            .collect();
        Self { rows, cols, cells }
    }

    /// Build a grid from rows of letters. All rows must have the same length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, EngineError> {
        let expected = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (row, line) in rows.iter().enumerate() {
            let found = line.as_ref().chars().count();
            if found != expected {
                return Err(EngineError::RaggedGrid { row, expected, found });
            }
            for (col, letter) in line.as_ref().chars().enumerate() {
                cells.push(Cell::new(letter, GridPos::new(row, col)));
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols: expected,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn idx(&self, pos: GridPos) -> Option<usize> {
        if pos.row < self.rows && pos.col < self.cols {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.idx(pos).is_some()
    }

    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.idx(pos).map(|i| &self.cells[i])
    }

    pub(crate) fn get_mut(&mut self, pos: GridPos) -> Option<&mut Cell> {
        match self.idx(pos) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// Overwrite the letter at `pos`. Used while building a fresh grid.
    pub(crate) fn set_letter(&mut self, pos: GridPos, letter: char) {
        if let Some(cell) = self.get_mut(pos) {
            cell.letter = canonical_letter(letter);
        }
    }

    /// Whether `pos` can join a selection: in bounds and not solved.
    pub fn is_selectable(&self, pos: GridPos) -> bool {
        self.get(pos).is_some_and(|c| !c.solved)
    }

    pub(crate) fn set_selected(&mut self, pos: GridPos, selected: bool) {
        if let Some(cell) = self.get_mut(pos) {
            cell.selected = selected;
        }
    }

    pub(crate) fn mark_solved(&mut self, pos: GridPos) {
        if let Some(cell) = self.get_mut(pos) {
            cell.solved = true;
            cell.selected = false;
        }
    }

    /// Drop every selected and solved mark, keeping the letters.
    pub(crate) fn clear_marks(&mut self) {
        for cell in &mut self.cells {
            cell.selected = false;
            cell.solved = false;
        }
    }

    /// In-bounds neighbours of `pos` under the adjacency rule.
    pub fn neighbors(&self, pos: GridPos, adjacency: Adjacency) -> impl Iterator<Item = GridPos> + '_ {
        adjacency.offsets().iter().filter_map(move |&(dr, dc)| {
            let row = pos.row.checked_add_signed(dr)?;
            let col = pos.col.checked_add_signed(dc)?;
            let next = GridPos::new(row, col);
            self.contains(next).then_some(next)
        })
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Positions of every solved cell, row-major.
    pub fn solved_positions(&self) -> Vec<GridPos> {
        self.cells.iter().filter(|c| c.solved).map(|c| c.position).collect()
    }

    /// Positions of every currently selected cell, row-major.
    pub fn selected_positions(&self) -> Vec<GridPos> {
        self.cells.iter().filter(|c| c.selected).map(|c| c.position).collect()
    }

    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_uppercases_letters() {
        let grid = Grid::from_rows(&["ab", "cd"]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.get(GridPos::new(1, 0)).unwrap().letter(), 'C');
        assert_eq!(grid.get(GridPos::new(1, 1)).unwrap().position(), GridPos::new(1, 1));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Grid::from_rows(&["abc", "de"]).unwrap_err();
        assert_eq!(err, EngineError::RaggedGrid { row: 1, expected: 3, found: 2 });
    }

    #[test]
    fn out_of_bounds_returns_none() {
        let grid = Grid::new(3, 3, 'A');
        assert!(grid.get(GridPos::new(3, 0)).is_none());
        assert!(!grid.contains(GridPos::new(0, 3)));
        assert!(!grid.is_selectable(GridPos::new(9, 9)));
    }

    #[test]
    fn adjacency_rules() {
        let center = GridPos::new(1, 1);
        assert!(center.is_adjacent(GridPos::new(0, 0), Adjacency::Eight));
        assert!(!center.is_adjacent(GridPos::new(0, 0), Adjacency::Four));
        assert!(center.is_adjacent(GridPos::new(1, 2), Adjacency::Four));
        assert!(!center.is_adjacent(center, Adjacency::Eight));
        assert!(!center.is_adjacent(GridPos::new(1, 3), Adjacency::Eight));
    }

    #[test]
    fn neighbors_clipped_at_corner() {
        let grid = Grid::new(3, 3, 'A');
        let corner: Vec<_> = grid.neighbors(GridPos::new(0, 0), Adjacency::Eight).collect();
        assert_eq!(corner.len(), 3);
        let corner4: Vec<_> = grid.neighbors(GridPos::new(0, 0), Adjacency::Four).collect();
        assert_eq!(corner4.len(), 2);
        let center: Vec<_> = grid.neighbors(GridPos::new(1, 1), Adjacency::Eight).collect();
        assert_eq!(center.len(), 8);
    }

    #[test]
    fn solved_cells_not_selectable() {
        let mut grid = Grid::new(2, 2, 'A');
        grid.set_selected(GridPos::new(0, 1), true);
        grid.mark_solved(GridPos::new(0, 1));
        assert!(!grid.is_selectable(GridPos::new(0, 1)));
        assert!(!grid.get(GridPos::new(0, 1)).unwrap().is_selected());
        assert_eq!(grid.solved_positions(), vec![GridPos::new(0, 1)]);

        grid.clear_marks();
        assert!(grid.solved_positions().is_empty());
    }
}
