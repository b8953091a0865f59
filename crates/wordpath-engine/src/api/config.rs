use serde::{Deserialize, Serialize};

use crate::assets::word_bank::DEFAULT_BLANK_MARKER;
use crate::core::grid::Adjacency;

/// Per-session configuration. Every field has a default, so a partial JSON
/// object (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Neighbour rule for tracing paths (default: eight-way).
    pub adjacency: Adjacency,
    /// Grid height for generated rounds (default: 8).
    pub rows: usize,
    /// Grid width for generated rounds (default: 8).
    pub cols: usize,
    /// RNG seed for sentence choice and grid generation (default: 42).
    pub seed: u64,
    /// Placeholder in sentence templates (default: "___").
    pub blank_marker: String,
    /// Character used to pad the in-progress word (default: '_').
    pub pad_char: char,
    /// Size of one tile in world units, for pointer mapping (default: 64).
    pub tile_size: f32,
    /// World-space position of the grid's top-left corner (default: origin).
    pub origin: [f32; 2],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            adjacency: Adjacency::Eight,
            rows: 8,
            cols: 8,
            seed: 42,
            blank_marker: DEFAULT_BLANK_MARKER.to_string(),
            pad_char: '_',
            tile_size: 64.0,
            origin: [0.0, 0.0],
        }
    }
}

impl SessionConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace values that would disable the session with their defaults.
    pub fn sanitized(mut self) -> Self {
        if self.blank_marker.is_empty() {
            log::warn!("empty blank_marker, using {:?}", DEFAULT_BLANK_MARKER);
            self.blank_marker = DEFAULT_BLANK_MARKER.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn partial_config_overrides() {
        let json = r#"{ "adjacency": "four", "rows": 5, "seed": 7, "blank_marker": "[blank]" }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.adjacency, Adjacency::Four);
        assert_eq!(config.rows, 5);
        assert_eq!(config.cols, 8);
        assert_eq!(config.seed, 7);
        assert_eq!(config.blank_marker, "[blank]");
        assert_eq!(config.pad_char, '_');
    }

    #[test]
    fn empty_blank_marker_falls_back() {
        let config = SessionConfig::from_json(r#"{ "blank_marker": "" }"#).unwrap();
        assert_eq!(config.blank_marker, DEFAULT_BLANK_MARKER);
    }

    #[test]
    fn unknown_adjacency_rejected() {
        assert!(SessionConfig::from_json(r#"{ "adjacency": "six" }"#).is_err());
    }
}
