pub mod api;
pub mod core;
pub mod assets;
pub mod systems;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::SessionConfig;
pub use api::layout::BoardLayout;
pub use api::session::Session;
pub use api::types::{SessionEvent, WireEvent};
pub use assets::dictionary::DictionaryDocument;
pub use assets::word_bank::{WordBank, WordEntry, DEFAULT_BLANK_MARKER};
pub use crate::core::engine::{EngineState, ValidationEngine, Verdict, MIN_WORD_LEN, POINTS_PER_LETTER};
pub use crate::core::grid::{Adjacency, Cell, Grid, GridPos, MAX_GRID_SIDE};
pub use crate::core::progress::{ProgressTracker, Target};
pub use crate::core::rng::Rng;
pub use crate::core::selection::{ExtendResult, FinalizedPath, SelectionPath};
pub use error::{DictionaryError, EngineError};
pub use input::queue::{InputEvent, InputQueue};
