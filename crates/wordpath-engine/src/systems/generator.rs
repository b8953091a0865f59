//! Grid generation.
//!
//! Each word is threaded through the grid along its own self-avoiding path
//! of adjacent cells. Paths never share cells, so solving one word never
//! locks a letter another word still needs. Remaining cells get random
//! filler letters.

use crate::core::grid::{Adjacency, Grid, GridPos, MAX_GRID_SIDE};
use crate::core::rng::Rng;
use crate::error::EngineError;

/// Full-layout attempts before giving up.
const MAX_LAYOUT_ATTEMPTS: usize = 32;
/// Start cells tried per word within one layout attempt.
const MAX_STARTS_PER_WORD: usize = 16;
/// DFS steps allowed per start cell.
const STEP_BUDGET: usize = 2048;

const FILLER: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Build a `rows` x `cols` grid containing every word as a traceable path.
/// Either side may be at most [`MAX_GRID_SIDE`].
pub fn generate(
    words: &[&str],
    rows: usize,
    cols: usize,
    adjacency: Adjacency,
    rng: &mut Rng,
) -> Result<Grid, EngineError> {
    if rows > MAX_GRID_SIDE || cols > MAX_GRID_SIDE {
        log::warn!("refusing to generate a {}x{} grid", rows, cols);
        return Err(EngineError::GridTooLarge { rows, cols, max: MAX_GRID_SIDE });
    }

    let total: usize = words.iter().map(|w| w.chars().count()).sum();
    if total > rows * cols {
        let word = words.last().map(|w| w.to_string()).unwrap_or_default();
        return Err(EngineError::PlacementFailed { word });
    }

    // Longest words first: they need the most room.
    let mut order: Vec<usize> = (0..words.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(words[i].chars().count()));

    let mut last_failure = None;
    for attempt in 0..MAX_LAYOUT_ATTEMPTS {
        let mut grid = Grid::new(rows, cols, 'A');
        let mut occupied = vec![false; rows * cols];
        let mut failed = None;

        for &i in &order {
            let letters: Vec<char> = words[i].chars().collect();
            match place_word(&grid, &occupied, &letters, adjacency, rng) {
                Some(path) => {
                    for (&pos, &letter) in path.iter().zip(&letters) {
                        occupied[pos.row * cols + pos.col] = true;
                        grid.set_letter(pos, letter);
                    }
                }
                None => {
                    failed = Some(words[i].to_string());
                    break;
                }
            }
        }

        if failed.is_none() {
            for row in 0..rows {
                for col in 0..cols {
                    if !occupied[row * cols + col] {
                        let letter = *rng.choose(&FILLER).unwrap_or(&'A');
                        grid.set_letter(GridPos::new(row, col), letter);
                    }
                }
            }
            log::debug!("generated {}x{} grid for {} words in {} attempt(s)", rows, cols, words.len(), attempt + 1);
            return Ok(grid);
        }
        last_failure = failed;
    }

    let word: String = last_failure.unwrap_or_default();
    log::warn!("grid generation failed placing {}", word);
    Err(EngineError::PlacementFailed { word })
}

fn place_word(
    grid: &Grid,
    occupied: &[bool],
    letters: &[char],
    adjacency: Adjacency,
    rng: &mut Rng,
) -> Option<Vec<GridPos>> {
    if letters.is_empty() {
        return Some(Vec::new());
    }

    let cols = grid.cols();
    let mut free: Vec<GridPos> = grid
        .iter()
        .map(|c| c.position())
        .filter(|p| !occupied[p.row * cols + p.col])
        .collect();
    rng.shuffle(&mut free);

    for &start in free.iter().take(MAX_STARTS_PER_WORD) {
        let mut path = Vec::with_capacity(letters.len());
        path.push(start);
        let mut budget = STEP_BUDGET;
        if walk(grid, occupied, letters.len(), adjacency, rng, &mut path, &mut budget) {
            return Some(path);
        }
    }
    None
}

/// Randomised depth-first extension of `path` to `len` cells.
fn walk(
    grid: &Grid,
    occupied: &[bool],
    len: usize,
    adjacency: Adjacency,
    rng: &mut Rng,
    path: &mut Vec<GridPos>,
    budget: &mut usize,
) -> bool {
    if path.len() >= len {
        return true;
    }
    if *budget == 0 {
        return false;
    }
    *budget -= 1;

    let Some(&last) = path.last() else {
        return false;
    };
    let cols = grid.cols();
    let mut next: Vec<GridPos> = grid
        .neighbors(last, adjacency)
        .filter(|p| !occupied[p.row * cols + p.col] && !path.contains(p))
        .collect();
    rng.shuffle(&mut next);

    for pos in next {
        path.push(pos);
        if walk(grid, occupied, len, adjacency, rng, path, budget) {
            return true;
        }
        path.pop();
    }
    false
}
