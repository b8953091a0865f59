use crate::core::grid::{Adjacency, Grid, GridPos};
use crate::error::EngineError;

/// Outcome of feeding one position into an active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendResult {
    /// Position appended to the end of the path.
    Appended,
    /// Pointer re-entered the previous tile; the last tile was dropped.
    Backtracked,
    /// Not adjacent, already on the path, solved, out of bounds, or no active path.
    Ignored,
}

/// A consumed selection: the traced positions and the word they spell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinalizedPath {
    pub positions: Vec<GridPos>,
    pub word: String,
}

impl FinalizedPath {
    /// Word length in letters.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// The tile path currently being traced.
///
/// Invariants: consecutive positions are adjacent under `adjacency`, no
/// position repeats, and no position refers to a solved cell. Every member
/// cell is marked selected on the grid while it is on the path.
#[derive(Debug, Clone)]
pub struct SelectionPath {
    positions: Vec<GridPos>,
    adjacency: Adjacency,
}

impl SelectionPath {
    pub fn new(adjacency: Adjacency) -> Self {
        Self {
            positions: Vec::with_capacity(16),
            adjacency,
        }
    }

    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Begin a new path at `pos`, discarding any path already in progress.
    pub fn start(&mut self, grid: &mut Grid, pos: GridPos) -> Result<(), EngineError> {
        if !grid.is_selectable(pos) {
            return Err(EngineError::OutOfBounds(pos));
        }
        self.unselect_all(grid);
        self.positions.push(pos);
        grid.set_selected(pos, true);
        log::debug!("selection started at ({}, {})", pos.row, pos.col);
        Ok(())
    }

    /// Feed the next hovered position into the path.
    pub fn extend(&mut self, grid: &mut Grid, pos: GridPos) -> ExtendResult {
        let Some(&last) = self.positions.last() else {
            return ExtendResult::Ignored;
        };

        // Re-entering the previous tile undoes the last step.
        let len = self.positions.len();
        if len >= 2 && self.positions[len - 2] == pos {
            self.positions.pop();
            grid.set_selected(last, false);
            return ExtendResult::Backtracked;
        }

        if !grid.is_selectable(pos)
            || self.positions.contains(&pos)
            || !last.is_adjacent(pos, self.adjacency)
        {
            return ExtendResult::Ignored;
        }

        self.positions.push(pos);
        grid.set_selected(pos, true);
        ExtendResult::Appended
    }

    /// Consume the path: return its letters in order and unselect its cells.
    /// An empty path yields an empty word and leaves the grid untouched.
    pub fn finalize(&mut self, grid: &mut Grid) -> FinalizedPath {
        let word = self.letters(grid);
        let positions = std::mem::take(&mut self.positions);
        for &pos in &positions {
            grid.set_selected(pos, false);
        }
        FinalizedPath { positions, word }
    }

    /// Drop the path without producing a word.
    pub fn cancel(&mut self, grid: &mut Grid) {
        self.unselect_all(grid);
    }

    /// Letters along the path, uppercased, in path order.
    pub fn letters(&self, grid: &Grid) -> String {
        self.positions
            .iter()
            .filter_map(|&p| grid.get(p))
            .map(|c| c.letter())
            .collect()
    }

    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Forget the path without touching the grid. Used when the grid itself is replaced.
    pub(crate) fn reset(&mut self) {
        self.positions.clear();
    }

    fn unselect_all(&mut self, grid: &mut Grid) {
        for pos in self.positions.drain(..) {
            grid.set_selected(pos, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_rows(&["CATS", "ODER", "WXYZ"]).unwrap()
    }

    fn p(row: usize, col: usize) -> GridPos {
        GridPos::new(row, col)
    }

    #[test]
    fn start_then_extend_reconstructs_path() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        let trace = [p(0, 0), p(0, 1), p(1, 2), p(2, 3)];

        path.start(&mut g, trace[0]).unwrap();
        for &pos in &trace[1..] {
            assert_eq!(path.extend(&mut g, pos), ExtendResult::Appended);
        }

        assert_eq!(path.positions(), &trace);
        assert_eq!(path.letters(&g), "CAEZ");
        assert_eq!(g.selected_positions().len(), 4);
    }

    #[test]
    fn start_rejects_out_of_bounds_and_solved() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        assert_eq!(path.start(&mut g, p(5, 0)), Err(EngineError::OutOfBounds(p(5, 0))));

        g.mark_solved(p(0, 0));
        assert_eq!(path.start(&mut g, p(0, 0)), Err(EngineError::OutOfBounds(p(0, 0))));
        assert!(path.is_empty());
    }

    #[test]
    fn start_discards_previous_path() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        path.start(&mut g, p(0, 0)).unwrap();
        path.extend(&mut g, p(0, 1));
        path.start(&mut g, p(2, 0)).unwrap();
        assert_eq!(path.positions(), &[p(2, 0)]);
        assert_eq!(g.selected_positions(), vec![p(2, 0)]);
    }

    #[test]
    fn extend_rejects_non_adjacent_without_change() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        path.start(&mut g, p(0, 0)).unwrap();
        assert_eq!(path.extend(&mut g, p(0, 2)), ExtendResult::Ignored);
        assert_eq!(path.extend(&mut g, p(0, 2)), ExtendResult::Ignored);
        assert_eq!(path.positions(), &[p(0, 0)]);
    }

    #[test]
    fn extend_rejects_diagonal_with_four_adjacency() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Four);
        path.start(&mut g, p(0, 0)).unwrap();
        assert_eq!(path.extend(&mut g, p(1, 1)), ExtendResult::Ignored);
        assert_eq!(path.extend(&mut g, p(1, 0)), ExtendResult::Appended);
    }

    #[test]
    fn extend_rejects_solved_and_repeated_cells() {
        let mut g = grid();
        g.mark_solved(p(1, 1));
        let mut path = SelectionPath::new(Adjacency::Eight);
        path.start(&mut g, p(0, 0)).unwrap();
        assert_eq!(path.extend(&mut g, p(1, 1)), ExtendResult::Ignored);

        path.extend(&mut g, p(0, 1));
        path.extend(&mut g, p(1, 0));
        // (0,0) is on the path but not the previous tile.
        assert_eq!(path.extend(&mut g, p(0, 0)), ExtendResult::Ignored);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn reentering_previous_tile_undoes_last_step() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        path.start(&mut g, p(0, 0)).unwrap();
        path.extend(&mut g, p(0, 1));
        path.extend(&mut g, p(0, 2));

        assert_eq!(path.extend(&mut g, p(0, 1)), ExtendResult::Backtracked);
        assert_eq!(path.positions(), &[p(0, 0), p(0, 1)]);
        assert!(!g.get(p(0, 2)).unwrap().is_selected());
    }

    #[test]
    fn extend_without_start_is_ignored() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        assert_eq!(path.extend(&mut g, p(0, 0)), ExtendResult::Ignored);
        assert!(g.selected_positions().is_empty());
    }

    #[test]
    fn finalize_returns_word_and_clears_marks() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        path.start(&mut g, p(0, 0)).unwrap();
        path.extend(&mut g, p(0, 1));
        path.extend(&mut g, p(0, 2));

        let done = path.finalize(&mut g);
        assert_eq!(done.word, "CAT");
        assert_eq!(done.len(), 3);
        assert_eq!(done.positions, vec![p(0, 0), p(0, 1), p(0, 2)]);
        assert!(path.is_empty());
        assert!(g.selected_positions().is_empty());
    }

    #[test]
    fn finalize_empty_path_is_noop() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        let done = path.finalize(&mut g);
        assert!(done.is_empty());
        assert_eq!(done.word, "");
    }

    #[test]
    fn cancel_unselects_cells() {
        let mut g = grid();
        let mut path = SelectionPath::new(Adjacency::Eight);
        path.start(&mut g, p(2, 0)).unwrap();
        path.extend(&mut g, p(2, 1));
        path.cancel(&mut g);
        assert!(path.is_empty());
        assert!(g.selected_positions().is_empty());
    }
}
