use std::collections::HashMap;
use std::path::Path;

use crate::assets::dictionary::DictionaryDocument;
use crate::core::rng::Rng;
use crate::error::{DictionaryError, EngineError};

/// Blank placeholder used in sentence templates unless configured otherwise.
pub const DEFAULT_BLANK_MARKER: &str = "___";

/// A progression word with its hint sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    sentences: Vec<String>,
}

impl WordEntry {
    /// Uppercase word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Sentence templates, never empty.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Word length in letters.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Category {
    name: String,
    entries: Vec<WordEntry>,
    index: HashMap<String, usize>,
}

/// Read-only index of categories and their ordered words.
///
/// Built once from a [`DictionaryDocument`]; there is no mutation API, so a
/// bank can be shared behind an `Arc` by every session.
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: Vec<Category>,
    by_name: HashMap<String, usize>,
    blank_marker: String,
}

/// Canonical lookup form of a word: trimmed and uppercased.
pub fn canonical_word(word: &str) -> String {
    word.trim().to_uppercase()
}

impl WordBank {
    /// An empty bank. Every lookup fails with `UnknownCategory`.
    /// An empty `blank_marker` is replaced by [`DEFAULT_BLANK_MARKER`].
    pub fn empty(blank_marker: &str) -> Self {
        let blank_marker = if blank_marker.is_empty() {
            log::warn!("empty blank marker, using {:?}", DEFAULT_BLANK_MARKER);
            DEFAULT_BLANK_MARKER
        } else {
            blank_marker
        };
        Self {
            categories: Vec::new(),
            by_name: HashMap::new(),
            blank_marker: blank_marker.to_string(),
        }
    }

    /// Build the index from a parsed document, dropping entries that break
    /// the data contract.
    pub fn from_document(doc: &DictionaryDocument, blank_marker: &str) -> Self {
        let mut bank = Self::empty(blank_marker);
        let blank_marker = bank.blank_marker.clone();
        let blank_marker = blank_marker.as_str();

        for desc in &doc.categories {
            if bank.by_name.contains_key(&desc.name) {
                log::warn!("duplicate category {:?} ignored", desc.name);
                continue;
            }

            let mut category = Category {
                name: desc.name.clone(),
                entries: Vec::with_capacity(desc.words.len()),
                index: HashMap::with_capacity(desc.words.len()),
            };

            for word_desc in &desc.words {
                let word = canonical_word(&word_desc.word);
                if word.is_empty() {
                    log::warn!("empty word in category {:?} skipped", desc.name);
                    continue;
                }
                if category.index.contains_key(&word) {
                    log::warn!("duplicate word {} in category {:?} skipped", word, desc.name);
                    continue;
                }
                let sentences: Vec<String> = word_desc
                    .sentences
                    .iter()
                    .filter(|s| s.matches(blank_marker).count() == 1)
                    .cloned()
                    .collect();
                if sentences.len() < word_desc.sentences.len() {
                    log::warn!(
                        "{} sentence(s) for {} lack a single {:?} marker",
                        word_desc.sentences.len() - sentences.len(),
                        word,
                        blank_marker,
                    );
                }
                if sentences.is_empty() {
                    log::warn!("word {} in category {:?} has no usable sentence, skipped", word, desc.name);
                    continue;
                }
                category.index.insert(word.clone(), category.entries.len());
                category.entries.push(WordEntry { word, sentences });
            }

            bank.by_name.insert(category.name.clone(), bank.categories.len());
            bank.categories.push(category);
        }

        log::info!("word bank loaded: {} categories", bank.categories.len());
        bank
    }

    /// Parse and index a JSON dictionary.
    pub fn from_json(json: &str, blank_marker: &str) -> Result<Self, DictionaryError> {
        let doc = DictionaryDocument::from_json(json)?;
        Ok(Self::from_document(&doc, blank_marker))
    }

    /// Parse a JSON dictionary, falling back to an empty bank on any error.
    pub fn load_or_empty(json: &str, blank_marker: &str) -> Self {
        Self::from_json(json, blank_marker).unwrap_or_else(|e| {
            log::error!("dictionary load failed, using empty word bank: {}", e);
            Self::empty(blank_marker)
        })
    }

    /// Read and index a dictionary file, falling back to an empty bank on any error.
    pub fn from_file_or_empty(path: impl AsRef<Path>, blank_marker: &str) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(DictionaryError::from)
            .and_then(|json| Self::from_json(&json, blank_marker));
        loaded.unwrap_or_else(|e| {
            log::error!("dictionary {} unreadable, using empty word bank: {}", path.display(), e);
            Self::empty(blank_marker)
        })
    }

    fn category(&self, name: &str) -> Result<&Category, EngineError> {
        self.by_name
            .get(name)
            .map(|&i| &self.categories[i])
            .ok_or_else(|| EngineError::UnknownCategory(name.to_string()))
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, category: &str, word: &str) -> Result<bool, EngineError> {
        let category = self.category(category)?;
        Ok(category.index.contains_key(&canonical_word(word)))
    }

    /// Words of a category in progression order.
    pub fn words_for(&self, category: &str) -> Result<Vec<&str>, EngineError> {
        Ok(self.entries(category)?.iter().map(|e| e.word()).collect())
    }

    /// Entries of a category in progression order.
    pub fn entries(&self, category: &str) -> Result<&[WordEntry], EngineError> {
        Ok(&self.category(category)?.entries)
    }

    /// Look up one entry, case-insensitively.
    pub fn entry(&self, category: &str, word: &str) -> Result<&WordEntry, EngineError> {
        let cat = self.category(category)?;
        cat.index
            .get(&canonical_word(word))
            .map(|&i| &cat.entries[i])
            .ok_or_else(|| EngineError::WordNotFound {
                word: canonical_word(word),
                category: category.to_string(),
            })
    }

    /// Pick one sentence template for `word`, uniformly at random.
    /// The blank marker is left in place for the caller to fill.
    pub fn sentence_for(&self, word: &str, category: &str, rng: &mut Rng) -> Result<&str, EngineError> {
        let entry = self.entry(category, word)?;
        // Entries always carry at least one sentence.
        Ok(rng.choose(&entry.sentences).map(String::as_str).unwrap_or_default())
    }

    /// Category names in authoring order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn blank_marker(&self) -> &str {
        &self.blank_marker
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
