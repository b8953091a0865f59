//! Selection and validation state machine.
//!
//! `Idle -> Selecting -> (Evaluating) -> Idle`. Evaluation happens inside
//! [`ValidationEngine::submit`] and always returns to `Idle` before the call
//! returns, so only two states are observable.

use std::sync::Arc;

use crate::assets::word_bank::WordBank;
use crate::core::grid::{Adjacency, Grid, GridPos};
use crate::core::progress::{ProgressTracker, Target};
use crate::core::rng::Rng;
use crate::core::selection::{ExtendResult, SelectionPath};
use crate::error::EngineError;
use crate::systems::hint;

/// Shortest path that is evaluated against the target.
pub const MIN_WORD_LEN: usize = 3;

/// Points awarded per letter of a correct word.
pub const POINTS_PER_LETTER: u32 = 100;

/// Score for a correct word of `len` letters.
pub fn points_for(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX).saturating_mul(POINTS_PER_LETTER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No active path.
    Idle,
    /// A path is being traced.
    Selecting,
}

/// Result of evaluating a finalized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Fewer than [`MIN_WORD_LEN`] letters.
    TooShort,
    /// Not the current target, or nothing left to match.
    Incorrect,
    /// The current target was spelled.
    Correct {
        word: String,
        points: u32,
        /// Sentence template for the word, blank marker intact.
        sentence: String,
    },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }
}

/// Orchestrates one play-through: the grid, the live selection, and
/// progression through the selected category.
pub struct ValidationEngine {
    bank: Arc<WordBank>,
    grid: Grid,
    path: SelectionPath,
    progress: ProgressTracker,
    rng: Rng,
    /// Sentence template shown for the current target.
    sentence: Option<String>,
    pad_char: char,
}

impl ValidationEngine {
    pub fn new(bank: Arc<WordBank>, grid: Grid, adjacency: Adjacency, seed: u64, pad_char: char) -> Self {
        Self {
            bank,
            grid,
            path: SelectionPath::new(adjacency),
            progress: ProgressTracker::new(),
            rng: Rng::new(seed),
            sentence: None,
            pad_char,
        }
    }

    pub fn state(&self) -> EngineState {
        if self.path.is_empty() {
            EngineState::Idle
        } else {
            EngineState::Selecting
        }
    }

    /// Switch category and rewind progression. Solved cells stay locked
    /// until a new grid is loaded.
    pub fn select_category(&mut self, category: &str) -> Result<(), EngineError> {
        self.progress.select_category(&self.bank, category)?;
        self.path.cancel(&mut self.grid);
        self.pick_sentence();
        Ok(())
    }

    /// Replace the grid. Any selection in progress is dropped and the new
    /// grid starts with every cell unlocked.
    pub fn load_grid(&mut self, mut grid: Grid) {
        self.path.reset();
        grid.clear_marks();
        self.grid = grid;
    }

    /// Begin a selection at `pos`.
    pub fn start(&mut self, pos: GridPos) -> Result<(), EngineError> {
        self.path.start(&mut self.grid, pos)
    }

    /// Extend the active selection. Ignored while `Idle`.
    pub fn extend(&mut self, pos: GridPos) -> ExtendResult {
        self.path.extend(&mut self.grid, pos)
    }

    /// Drop the active selection without a verdict.
    pub fn cancel(&mut self) {
        if !self.path.is_empty() {
            log::debug!("selection cancelled");
        }
        self.path.cancel(&mut self.grid);
    }

    /// Finalize the selection and evaluate it against the current target.
    pub fn submit(&mut self) -> Verdict {
        let finalized = self.path.finalize(&mut self.grid);
        // Letters are compared as traced; a blank tile is part of the word.
        let word = finalized.word.to_uppercase();

        if finalized.len() < MIN_WORD_LEN {
            log::debug!("submitted {:?}: too short", word);
            return Verdict::TooShort;
        }

        let target = match self.progress.current_target(&self.bank) {
            Target::Word(target) => target,
            Target::CategoryComplete => {
                log::debug!("submitted {} after category complete", word);
                return Verdict::Incorrect;
            }
        };

        if word != target {
            log::info!("submitted {}: incorrect", word);
            return Verdict::Incorrect;
        }

        let points = points_for(finalized.len());
        let sentence = self.sentence.take().unwrap_or_else(|| self.sentence_for(&word));

        for &pos in &finalized.positions {
            self.grid.mark_solved(pos);
        }
        self.progress.add_score(points);
        self.progress.advance();
        self.pick_sentence();

        log::info!("submitted {}: correct, +{} (score {})", word, points, self.progress.score());
        Verdict::Correct { word, points, sentence }
    }

    fn sentence_for(&mut self, word: &str) -> String {
        let Some(category) = self.progress.category() else {
            return String::new();
        };
        match self.bank.sentence_for(word, category, &mut self.rng) {
            Ok(s) => s.to_string(),
            Err(e) => {
                log::error!("no sentence for {}: {}", word, e);
                String::new()
            }
        }
    }

    /// Choose the sentence shown while the current target is unsolved.
    fn pick_sentence(&mut self) {
        self.sentence = match self.progress.current_target(&self.bank) {
            Target::Word(word) => {
                let word = word.to_string();
                Some(self.sentence_for(&word))
            }
            Target::CategoryComplete => None,
        };
    }

    /// The current target's sentence with the blank showing live selection
    /// progress, or `None` when there is no target.
    pub fn hint_text(&self) -> Option<String> {
        let sentence = self.sentence.as_deref()?;
        let target_len = match self.progress.current_target(&self.bank) {
            Target::Word(word) => word.chars().count(),
            Target::CategoryComplete => return None,
        };
        let letters = self.path.letters(&self.grid);
        let fill = hint::progress_fill(&letters, target_len, self.pad_char);
        Some(hint::fill_blank(sentence, self.bank.blank_marker(), &fill))
    }

    pub fn current_target(&self) -> Target<'_> {
        self.progress.current_target(&self.bank)
    }

    pub fn is_category_complete(&self) -> bool {
        self.progress.category().is_some() && self.progress.is_complete()
    }

    pub fn reset_score(&mut self) {
        self.progress.reset_score();
    }

    /// Mutable access to the RNG, shared with grid generation so a seeded
    /// session replays exactly.
    pub(crate) fn rng_mut(&mut self) -> &mut Rng {
        &mut self.rng
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }
}
