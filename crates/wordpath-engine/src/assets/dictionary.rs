use serde::{Deserialize, Serialize};

/// Dictionary document describing every category and its progression words.
/// Loaded from a JSON file at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryDocument {
    /// Categories in authoring order.
    #[serde(default)]
    pub categories: Vec<CategoryDescriptor>,
}

/// A named bucket of words, solved in the listed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Display name and lookup key (e.g., "Ancient Egypt").
    pub name: String,
    /// Words in progression order.
    #[serde(default)]
    pub words: Vec<WordDescriptor>,
}

/// A single word and the hint sentences that reveal it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordDescriptor {
    pub word: String,
    /// Sentence templates, each with one blank marker where the word goes.
    #[serde(default)]
    pub sentences: Vec<String>,
}

impl DictionaryDocument {
    /// Parse a dictionary from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
