use std::sync::Arc;

use wordpath_engine::{
    EngineError, Grid, InputEvent, Session, SessionConfig, Target, WireEvent, WordBank,
};

/// Owns the browser's single session and the flat buffers JS reads from.
///
/// Inputs are applied as they arrive: each push drains the session's queue,
/// so score and hint reads right after an input are never stale. Wire events
/// accumulate until JS calls `clear_events`.
pub struct SessionRunner {
    session: Session,
    wire_buffer: Vec<WireEvent>,
}

impl SessionRunner {
    /// Build a session from a dictionary document and a JSON config.
    /// A bad config falls back to defaults; a bad dictionary to an empty bank.
    pub fn new(dictionary_json: &str, config_json: &str) -> Self {
        let config = if config_json.trim().is_empty() {
            SessionConfig::default()
        } else {
            SessionConfig::from_json(config_json).unwrap_or_else(|e| {
                log::warn!("invalid session config, using defaults: {}", e);
                SessionConfig::default()
            })
        };
        let bank = Arc::new(WordBank::load_or_empty(dictionary_json, &config.blank_marker));
        Self {
            session: Session::new(bank, config),
            wire_buffer: Vec::with_capacity(32),
        }
    }

    fn collect_events(&mut self) {
        let events = self.session.drain_wire_events();
        self.wire_buffer.extend(events);
    }

    pub fn select_category(&mut self, name: &str) -> bool {
        let ok = report(self.session.select_category(name));
        self.collect_events();
        ok
    }

    pub fn new_round(&mut self, name: &str) -> bool {
        let ok = report(self.session.new_round(name));
        self.collect_events();
        ok
    }

    /// Load a grid from newline-separated rows of letters.
    pub fn load_grid(&mut self, rows: &str) -> bool {
        let lines: Vec<&str> = rows.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        match Grid::from_rows(&lines) {
            Ok(grid) => {
                self.session.load_grid(grid);
                self.collect_events();
                true
            }
            Err(e) => {
                log::warn!("grid rejected: {}", e);
                false
            }
        }
    }

    /// Push one input event and apply it immediately.
    pub fn push_input(&mut self, event: InputEvent) {
        self.session.push_input(event);
        self.session.process();
        self.collect_events();
    }

    pub fn reset_score(&mut self) {
        self.session.reset_score();
        self.collect_events();
    }

    /// Forget events JS has already read.
    pub fn clear_events(&mut self) {
        self.wire_buffer.clear();
    }

    // ---- Accessors read by JS ----

    pub fn events_ptr(&self) -> *const f32 {
        self.wire_buffer.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.wire_buffer.len() as u32
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn hint_text(&self) -> String {
        self.session.hint_text().unwrap_or_default()
    }

    pub fn target_len(&self) -> u32 {
        match self.session.current_target() {
            Target::Word(word) => word.chars().count() as u32,
            Target::CategoryComplete => 0,
        }
    }

    pub fn is_category_complete(&self) -> bool {
        self.session.is_category_complete()
    }

    /// Solved cells as flat row-major indices.
    pub fn solved_indices(&self) -> Vec<u32> {
        let cols = self.session.grid().cols();
        self.session
            .solved_cells()
            .iter()
            .map(|p| (p.row * cols + p.col) as u32)
            .collect()
    }

    /// Selected cells as flat row-major indices, in path order.
    pub fn selection_indices(&self) -> Vec<u32> {
        let cols = self.session.grid().cols();
        self.session
            .engine()
            .path()
            .positions()
            .iter()
            .map(|p| (p.row * cols + p.col) as u32)
            .collect()
    }

    /// Grid letters, one row per line.
    pub fn grid_letters(&self) -> String {
        let grid = self.session.grid();
        let mut out = String::with_capacity(grid.capacity() + grid.rows());
        for (i, cell) in grid.iter().enumerate() {
            if i > 0 && i % grid.cols() == 0 {
                out.push('\n');
            }
            out.push(cell.letter());
        }
        out
    }

    pub fn rows(&self) -> u32 {
        self.session.grid().rows() as u32
    }

    pub fn cols(&self) -> u32 {
        self.session.grid().cols() as u32
    }

    pub fn categories(&self) -> Vec<String> {
        self.session.bank().categories().map(str::to_string).collect()
    }
}

fn report(result: Result<(), EngineError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{}", e);
            false
        }
    }
}
