use crate::assets::word_bank::WordBank;
use crate::error::EngineError;

/// The word the player must spell next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Word(&'a str),
    /// Every word in the category has been solved.
    CategoryComplete,
}

/// Current category, position in its word list, and score.
///
/// `target_index` is always a valid index into the category's word list or
/// equal to its length ("category complete").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    category: Option<String>,
    target_index: usize,
    word_count: usize,
    score: u32,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `category` and rewind to its first word. Score is kept.
    pub fn select_category(&mut self, bank: &WordBank, category: &str) -> Result<(), EngineError> {
        let word_count = bank.entries(category)?.len();
        self.category = Some(category.to_string());
        self.target_index = 0;
        self.word_count = word_count;
        log::info!("category selected: {} ({} words)", category, word_count);
        Ok(())
    }

    /// The current target word, or `CategoryComplete`. With no category
    /// selected there is nothing to match, which also reads as complete.
    pub fn current_target<'a>(&self, bank: &'a WordBank) -> Target<'a> {
        let Some(category) = self.category.as_deref() else {
            return Target::CategoryComplete;
        };
        match bank.entries(category) {
            Ok(entries) => entries
                .get(self.target_index)
                .map(|e| Target::Word(e.word()))
                .unwrap_or(Target::CategoryComplete),
            Err(_) => Target::CategoryComplete,
        }
    }

    /// Move to the next word. Returns false (and does nothing) when the
    /// category is already complete.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.target_index += 1;
        true
    }

    /// Add points to the score, saturating at `u32::MAX`.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Zero the score, keeping the category and target.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn is_complete(&self) -> bool {
        self.target_index >= self.word_count
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::word_bank::DEFAULT_BLANK_MARKER;

    fn bank() -> WordBank {
        WordBank::from_json(
            r#"{ "categories": [
                { "name": "Ancient Egypt", "words": [
                    { "word": "pyramid", "sentences": ["The ___."] },
                    { "word": "pharaoh", "sentences": ["A ___."] }
                ] },
                { "name": "Empty" }
            ] }"#,
            DEFAULT_BLANK_MARKER,
        )
        .unwrap()
    }

    #[test]
    fn select_unknown_category_fails() {
        let bank = bank();
        let mut progress = ProgressTracker::new();
        assert_eq!(
            progress.select_category(&bank, "Atlantis"),
            Err(EngineError::UnknownCategory("Atlantis".into()))
        );
        assert_eq!(progress.category(), None);
    }

    #[test]
    fn advance_walks_word_list() {
        let bank = bank();
        let mut progress = ProgressTracker::new();
        progress.select_category(&bank, "Ancient Egypt").unwrap();
        assert_eq!(progress.current_target(&bank), Target::Word("PYRAMID"));

        assert!(progress.advance());
        assert_eq!(progress.current_target(&bank), Target::Word("PHARAOH"));

        assert!(progress.advance());
        assert_eq!(progress.current_target(&bank), Target::CategoryComplete);
        assert_eq!(progress.target_index(), 2);

        assert!(!progress.advance());
        assert_eq!(progress.target_index(), 2);
    }

    #[test]
    fn reselect_rewinds_but_keeps_score() {
        let bank = bank();
        let mut progress = ProgressTracker::new();
        progress.select_category(&bank, "Ancient Egypt").unwrap();
        progress.advance();
        progress.add_score(700);

        progress.select_category(&bank, "Ancient Egypt").unwrap();
        assert_eq!(progress.target_index(), 0);
        assert_eq!(progress.score(), 700);

        progress.reset_score();
        assert_eq!(progress.score(), 0);
    }

    #[test]
    fn empty_category_is_complete_immediately() {
        let bank = bank();
        let mut progress = ProgressTracker::new();
        progress.select_category(&bank, "Empty").unwrap();
        assert!(progress.is_complete());
        assert_eq!(progress.current_target(&bank), Target::CategoryComplete);
    }

    #[test]
    fn no_category_means_nothing_to_match() {
        let bank = bank();
        let progress = ProgressTracker::new();
        assert_eq!(progress.current_target(&bank), Target::CategoryComplete);
    }
}
