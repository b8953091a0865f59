use crate::core::grid::GridPos;

/// Input events the session understands.
///
/// Pointer events carry world coordinates and are mapped to cells through
/// the session's board layout. Cell events address a tile directly (keyboard
/// or accessibility front ends).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// Start a selection on a tile.
    CellDown(GridPos),
    /// Drag onto a tile.
    CellEnter(GridPos),
    /// Release the drag; submits the selection.
    CellUp,
    /// Explicit submit.
    Submit,
    /// Drop the current selection without a verdict.
    Cancel,
}

/// FIFO of input events. Front ends push from any source; the session
/// drains the whole backlog and applies it in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}
