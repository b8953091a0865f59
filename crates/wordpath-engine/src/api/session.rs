use std::sync::Arc;

use glam::Vec2;

use crate::api::config::SessionConfig;
use crate::api::layout::BoardLayout;
use crate::api::types::{SessionEvent, WireEvent};
use crate::assets::word_bank::WordBank;
use crate::core::engine::{EngineState, ValidationEngine, Verdict};
use crate::core::grid::{Grid, GridPos};
use crate::core::progress::Target;
use crate::core::selection::ExtendResult;
use crate::error::EngineError;
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::generator;

/// One play-through: the engine plus its input queue and outgoing events.
///
/// A session is owned by a single caller. Input from several sources must be
/// funnelled through [`Session::push_input`] (or the direct methods) from one
/// thread; events are applied strictly in the order they were pushed.
pub struct Session {
    bank: Arc<WordBank>,
    engine: ValidationEngine,
    config: SessionConfig,
    layout: BoardLayout,
    input: InputQueue,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session with an empty grid and no category selected.
    pub fn new(bank: Arc<WordBank>, config: SessionConfig) -> Self {
        let engine = ValidationEngine::new(
            Arc::clone(&bank),
            Grid::new(0, 0, 'A'),
            config.adjacency,
            config.seed,
            config.pad_char,
        );
        let layout = BoardLayout::new(0, 0, config.tile_size)
            .with_origin(Vec2::from(config.origin));
        Self {
            bank,
            engine,
            config,
            layout,
            input: InputQueue::new(),
            events: Vec::with_capacity(16),
        }
    }

    /// Switch to `category` and rewind its progression. The grid is kept as
    /// is, so cells solved earlier stay locked until the next round.
    pub fn select_category(&mut self, category: &str) -> Result<(), EngineError> {
        self.engine.select_category(category)?;
        let word_count = self.engine.progress().word_count();
        self.events.push(SessionEvent::CategorySelected { word_count });
        self.events.push(SessionEvent::SelectionChanged { len: 0 });
        if self.engine.is_category_complete() {
            self.events.push(SessionEvent::CategoryComplete);
        }
        Ok(())
    }

    /// Generate a fresh grid holding `category`'s words, then select it.
    /// On error the session is left as it was.
    pub fn new_round(&mut self, category: &str) -> Result<(), EngineError> {
        let words = self.bank.words_for(category)?;
        let grid = generator::generate(
            &words,
            self.config.rows,
            self.config.cols,
            self.config.adjacency,
            self.engine.rng_mut(),
        )?;
        self.load_grid(grid);
        self.select_category(category)
    }

    /// Replace the grid. Any selection in progress is dropped.
    pub fn load_grid(&mut self, grid: Grid) {
        self.layout.rows = grid.rows();
        self.layout.cols = grid.cols();
        self.engine.load_grid(grid);
        self.events.push(SessionEvent::SelectionChanged { len: 0 });
    }

    /// Queue an input event for the next [`Session::process`] call.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply every queued input event, one at a time, in arrival order.
    pub fn process(&mut self) {
        for event in self.input.drain() {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                if let Some(pos) = self.layout.world_to_cell(Vec2::new(x, y)) {
                    self.start_quietly(pos);
                }
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(pos) = self.layout.world_to_cell(Vec2::new(x, y)) {
                    self.extend(pos);
                }
            }
            InputEvent::CellDown(pos) => self.start_quietly(pos),
            InputEvent::CellEnter(pos) => {
                self.extend(pos);
            }
            // Releasing only submits an active drag; a stray release is not a guess.
            InputEvent::PointerUp { .. } | InputEvent::CellUp => {
                if self.engine.state() == EngineState::Selecting {
                    self.submit();
                }
            }
            InputEvent::Submit => {
                self.submit();
            }
            InputEvent::Cancel => self.cancel(),
        }
    }

    fn start_quietly(&mut self, pos: GridPos) {
        if let Err(e) = self.start(pos) {
            log::debug!("start rejected: {}", e);
        }
    }

    /// Begin a selection at `pos`.
    pub fn start(&mut self, pos: GridPos) -> Result<(), EngineError> {
        self.engine.start(pos)?;
        self.events.push(SessionEvent::SelectionChanged { len: 1 });
        Ok(())
    }

    /// Extend the active selection to `pos`.
    pub fn extend(&mut self, pos: GridPos) -> ExtendResult {
        let result = self.engine.extend(pos);
        if result != ExtendResult::Ignored {
            let len = self.engine.path().len();
            self.events.push(SessionEvent::SelectionChanged { len });
        }
        result
    }

    /// Drop the active selection without a verdict.
    pub fn cancel(&mut self) {
        let had_path = self.engine.state() == EngineState::Selecting;
        self.engine.cancel();
        if had_path {
            self.events.push(SessionEvent::SelectionChanged { len: 0 });
        }
    }

    /// Evaluate the active selection against the current target.
    pub fn submit(&mut self) -> Verdict {
        let had_path = self.engine.state() == EngineState::Selecting;
        let verdict = self.engine.submit();
        if had_path {
            self.events.push(SessionEvent::SelectionChanged { len: 0 });
        }
        self.events.push(SessionEvent::Verdict(verdict.clone()));
        if verdict.is_correct() {
            self.events.push(SessionEvent::ScoreChanged(self.engine.score()));
            if self.engine.is_category_complete() {
                log::info!("category complete");
                self.events.push(SessionEvent::CategoryComplete);
            }
        }
        verdict
    }

    /// Zero the score.
    pub fn reset_score(&mut self) {
        self.engine.reset_score();
        self.events.push(SessionEvent::ScoreChanged(0));
    }

    /// Take all events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take all pending events in their flat wire form.
    pub fn drain_wire_events(&mut self) -> Vec<WireEvent> {
        self.events.drain(..).map(|e| WireEvent::from(&e)).collect()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    /// Current target sentence with the live selection filled into the blank.
    pub fn hint_text(&self) -> Option<String> {
        self.engine.hint_text()
    }

    pub fn solved_cells(&self) -> Vec<GridPos> {
        self.engine.grid().solved_positions()
    }

    pub fn is_category_complete(&self) -> bool {
        self.engine.is_category_complete()
    }

    pub fn current_target(&self) -> Target<'_> {
        self.engine.current_target()
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::word_bank::DEFAULT_BLANK_MARKER;

    const DICT: &str = r#"{ "categories": [
        { "name": "Ancient Egypt", "words": [
            { "word": "PYRAMID", "sentences": ["The great ___ stands at Giza."] },
            { "word": "PHARAOH", "sentences": ["The ___ ruled the Nile."] }
        ] },
        { "name": "Rome", "words": [
            { "word": "forum", "sentences": ["Senators met in the ___."] }
        ] }
    ] }"#;

    fn session() -> Session {
        let bank = Arc::new(WordBank::from_json(DICT, DEFAULT_BLANK_MARKER).unwrap());
        let mut session = Session::new(bank, SessionConfig::default());
        session.load_grid(Grid::from_rows(&["PYRAMID", "PHARAOH", "XXXXXXX"]).unwrap());
        session.select_category("Ancient Egypt").unwrap();
        session.drain_events();
        session
    }

    fn push_row(session: &mut Session, row: usize) {
        session.push_input(InputEvent::CellDown(GridPos::new(row, 0)));
        for col in 1..7 {
            session.push_input(InputEvent::CellEnter(GridPos::new(row, col)));
        }
        session.push_input(InputEvent::CellUp);
    }

    #[test]
    fn ancient_egypt_walkthrough() {
        let mut s = session();

        push_row(&mut s, 0);
        s.process();
        assert_eq!(s.score(), 700);
        assert_eq!(s.engine().progress().target_index(), 1);
        assert_eq!(s.solved_cells().len(), 7);

        push_row(&mut s, 1);
        s.process();
        assert_eq!(s.score(), 1400);
        assert_eq!(s.current_target(), Target::CategoryComplete);
        assert!(s.is_category_complete());

        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::ScoreChanged(1400)));
        assert_eq!(events.last(), Some(&SessionEvent::CategoryComplete));

        push_row(&mut s, 2);
        s.process();
        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::Verdict(Verdict::Incorrect)));
        assert_eq!(s.score(), 1400);
        assert_eq!(s.engine().progress().target_index(), 2);
    }

    #[test]
    fn pointer_events_map_through_layout() {
        let mut s = session();
        let tile = s.config().tile_size;
        let at = |col: usize| (col as f32 + 0.5) * tile;

        s.push_input(InputEvent::PointerDown { x: at(0), y: at(0) });
        for col in 1..7 {
            // Several moves inside the same tile count once.
            s.push_input(InputEvent::PointerMove { x: at(col) - 5.0, y: at(0) });
            s.push_input(InputEvent::PointerMove { x: at(col) + 5.0, y: at(0) });
        }
        s.push_input(InputEvent::PointerUp { x: at(6), y: at(0) });
        s.process();

        assert_eq!(s.score(), 700);
        assert_eq!(s.state(), EngineState::Idle);
    }

    #[test]
    fn stray_release_produces_no_verdict() {
        let mut s = session();
        s.push_input(InputEvent::PointerUp { x: 1.0, y: 1.0 });
        s.push_input(InputEvent::CellUp);
        s.process();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn cancel_then_submit_is_too_short() {
        let mut s = session();
        s.push_input(InputEvent::CellDown(GridPos::new(0, 0)));
        s.push_input(InputEvent::CellEnter(GridPos::new(0, 1)));
        s.push_input(InputEvent::CellEnter(GridPos::new(0, 2)));
        s.push_input(InputEvent::Cancel);
        s.push_input(InputEvent::Submit);
        s.process();

        let events = s.drain_events();
        assert_eq!(events.last(), Some(&SessionEvent::Verdict(Verdict::TooShort)));
        assert_eq!(s.score(), 0);
        assert!(s.grid().selected_positions().is_empty());
    }

    #[test]
    fn hint_follows_drag() {
        let mut s = session();
        s.push_input(InputEvent::CellDown(GridPos::new(0, 0)));
        s.push_input(InputEvent::CellEnter(GridPos::new(0, 1)));
        s.process();
        assert_eq!(s.hint_text().unwrap(), "The great PY_____ stands at Giza.");

        // Drag back over the previous tile.
        s.push_input(InputEvent::CellEnter(GridPos::new(0, 0)));
        s.process();
        assert_eq!(s.hint_text().unwrap(), "The great P______ stands at Giza.");
    }

    #[test]
    fn unknown_category_leaves_state() {
        let mut s = session();
        assert_eq!(
            s.select_category("Atlantis"),
            Err(EngineError::UnknownCategory("Atlantis".into()))
        );
        assert_eq!(s.engine().progress().category(), Some("Ancient Egypt"));
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn new_round_generates_playable_grid() {
        let bank = Arc::new(WordBank::from_json(DICT, DEFAULT_BLANK_MARKER).unwrap());
        let mut s = Session::new(bank, SessionConfig::default());
        s.new_round("Rome").unwrap();

        assert_eq!(s.grid().rows(), 8);
        assert_eq!(s.layout().cols, 8);
        assert_eq!(s.current_target(), Target::Word("FORUM"));
        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::CategorySelected { word_count: 1 }));
    }

    #[test]
    fn new_round_oversized_config_is_rejected() {
        let bank = Arc::new(WordBank::from_json(DICT, DEFAULT_BLANK_MARKER).unwrap());
        let config = SessionConfig::from_json(r#"{ "rows": 100000, "cols": 100000 }"#).unwrap();
        let mut s = Session::new(bank, config);
        assert!(matches!(s.new_round("Rome"), Err(EngineError::GridTooLarge { .. })));
        assert_eq!(s.grid().capacity(), 0);
        assert_eq!(s.engine().progress().category(), None);
    }

    #[test]
    fn new_round_unknown_category() {
        let bank = Arc::new(WordBank::from_json(DICT, DEFAULT_BLANK_MARKER).unwrap());
        let mut s = Session::new(bank, SessionConfig::default());
        assert!(s.new_round("Atlantis").is_err());
        assert_eq!(s.grid().capacity(), 0);
    }

    #[test]
    fn empty_bank_session_degrades() {
        let bank = Arc::new(WordBank::load_or_empty("garbage", DEFAULT_BLANK_MARKER));
        let mut s = Session::new(bank, SessionConfig::default());
        assert!(s.select_category("Ancient Egypt").is_err());
        assert_eq!(s.submit(), Verdict::TooShort);
        assert_eq!(s.current_target(), Target::CategoryComplete);
        assert!(!s.is_category_complete());
        assert!(s.hint_text().is_none());
    }

    #[test]
    fn wire_events_drain_queue() {
        let mut s = session();
        s.reset_score();
        let wire = s.drain_wire_events();
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].kind, crate::api::types::EVENT_SCORE);
        assert!(s.drain_events().is_empty());
    }
}
