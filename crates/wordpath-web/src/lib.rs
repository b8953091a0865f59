pub mod runner;

pub use runner::SessionRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wordpath_engine::{GridPos, InputEvent};

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the session, or return `R::default()` before `session_init`.
fn with_runner<R: Default>(f: impl FnOnce(&mut SessionRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("session not initialized; call session_init() first");
            R::default()
        }
    })
}

fn cell(row: u32, col: u32) -> GridPos {
    GridPos::new(row as usize, col as usize)
}

/// Create the session. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn session_init(dictionary_json: &str, config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SessionRunner::new(dictionary_json, config_json);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("wordpath: session initialized");
}

#[wasm_bindgen]
pub fn session_select_category(name: &str) -> bool {
    with_runner(|r| r.select_category(name))
}

#[wasm_bindgen]
pub fn session_new_round(name: &str) -> bool {
    with_runner(|r| r.new_round(name))
}

#[wasm_bindgen]
pub fn session_load_grid(rows: &str) -> bool {
    with_runner(|r| r.load_grid(rows))
}

#[wasm_bindgen]
pub fn session_reset_score() {
    with_runner(|r| r.reset_score());
}

// ---- Input ----

#[wasm_bindgen]
pub fn session_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn session_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn session_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn session_cell_down(row: u32, col: u32) {
    with_runner(|r| r.push_input(InputEvent::CellDown(cell(row, col))));
}

#[wasm_bindgen]
pub fn session_cell_enter(row: u32, col: u32) {
    with_runner(|r| r.push_input(InputEvent::CellEnter(cell(row, col))));
}

#[wasm_bindgen]
pub fn session_cell_up() {
    with_runner(|r| r.push_input(InputEvent::CellUp));
}

#[wasm_bindgen]
pub fn session_submit() {
    with_runner(|r| r.push_input(InputEvent::Submit));
}

#[wasm_bindgen]
pub fn session_cancel() {
    with_runner(|r| r.push_input(InputEvent::Cancel));
}

// ---- Outputs ----

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|r| r.events_ptr())
            .unwrap_or(std::ptr::null())
    })
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn session_clear_events() {
    with_runner(|r| r.clear_events());
}

#[wasm_bindgen]
pub fn get_score() -> u32 {
    with_runner(|r| r.score())
}

#[wasm_bindgen]
pub fn get_hint_text() -> String {
    with_runner(|r| r.hint_text())
}

#[wasm_bindgen]
pub fn get_target_len() -> u32 {
    with_runner(|r| r.target_len())
}

#[wasm_bindgen]
pub fn is_category_complete() -> bool {
    with_runner(|r| r.is_category_complete())
}

#[wasm_bindgen]
pub fn get_solved_cells() -> js_sys::Uint32Array {
    let indices = with_runner(|r| r.solved_indices());
    js_sys::Uint32Array::from(indices.as_slice())
}

#[wasm_bindgen]
pub fn get_selected_cells() -> js_sys::Uint32Array {
    let indices = with_runner(|r| r.selection_indices());
    js_sys::Uint32Array::from(indices.as_slice())
}

#[wasm_bindgen]
pub fn get_grid_letters() -> String {
    with_runner(|r| r.grid_letters())
}

#[wasm_bindgen]
pub fn get_grid_rows() -> u32 {
    with_runner(|r| r.rows())
}

#[wasm_bindgen]
pub fn get_grid_cols() -> u32 {
    with_runner(|r| r.cols())
}

#[wasm_bindgen]
pub fn get_categories() -> js_sys::Array {
    let names = with_runner(|r| r.categories());
    names.iter().map(|n| JsValue::from_str(n)).collect()
}
