use bytemuck::{Pod, Zeroable};

use crate::core::engine::Verdict;

/// Something the presentation layer should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A category was (re)selected; progression starts over.
    CategorySelected { word_count: usize },
    /// The live selection grew, shrank, or was cleared.
    SelectionChanged { len: usize },
    /// A selection was evaluated.
    Verdict(Verdict),
    /// The score changed to this value.
    ScoreChanged(u32),
    /// The last word of the category was solved.
    CategoryComplete,
}

// Wire kinds (Rust -> JS). Must stay in sync with the front end.
pub const EVENT_CATEGORY_SELECTED: f32 = 1.0;
pub const EVENT_SELECTION_CHANGED: f32 = 2.0;
pub const EVENT_TOO_SHORT: f32 = 3.0;
pub const EVENT_INCORRECT: f32 = 4.0;
pub const EVENT_CORRECT: f32 = 5.0;
pub const EVENT_SCORE: f32 = 6.0;
pub const EVENT_CATEGORY_COMPLETE: f32 = 7.0;

/// Flat event record handed to JS as a float buffer.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;

    fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }
}

impl From<&SessionEvent> for WireEvent {
    fn from(event: &SessionEvent) -> Self {
        match event {
            SessionEvent::CategorySelected { word_count } => {
                WireEvent::new(EVENT_CATEGORY_SELECTED, *word_count as f32)
            }
            SessionEvent::SelectionChanged { len } => WireEvent::new(EVENT_SELECTION_CHANGED, *len as f32),
            SessionEvent::Verdict(Verdict::TooShort) => WireEvent::new(EVENT_TOO_SHORT, 0.0),
            SessionEvent::Verdict(Verdict::Incorrect) => WireEvent::new(EVENT_INCORRECT, 0.0),
            SessionEvent::Verdict(Verdict::Correct { word, points, .. }) => WireEvent {
                kind: EVENT_CORRECT,
                a: *points as f32,
                b: word.chars().count() as f32,
                c: 0.0,
            },
            SessionEvent::ScoreChanged(score) => WireEvent::new(EVENT_SCORE, *score as f32),
            SessionEvent::CategoryComplete => WireEvent::new(EVENT_CATEGORY_COMPLETE, 0.0),
        }
    }
}
