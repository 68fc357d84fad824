//! Browser bindings
//!
//! Every export mirrors one `api` operation. Errors surface in JavaScript as
//! thrown `Error`s carrying the engine's message.

use wasm_bindgen::prelude::*;

use crate::api;
use crate::sim::level::Theme;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Ignore the error if a logger was already installed by the host page
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("ascii-maze engine loaded");
}

/// A rendered frame together with the state to hand back next time
#[wasm_bindgen]
pub struct RenderedFrame {
    frame: String,
    state: String,
}

#[wasm_bindgen]
impl RenderedFrame {
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> String {
        self.frame.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.state.clone()
    }
}

#[wasm_bindgen]
pub fn init_game() -> Result<String, JsError> {
    Ok(api::init_game()?)
}

#[wasm_bindgen]
pub fn update_game(state: &str, input: &str) -> Result<String, JsError> {
    Ok(api::update_game(state, input)?)
}

#[wasm_bindgen]
pub fn render_frame(state: &str, width: i32, height: i32) -> Result<RenderedFrame, JsError> {
    let (frame, state) = api::render_frame(state, width as i64, height as i64)?;
    Ok(RenderedFrame { frame, state })
}

#[wasm_bindgen]
pub fn restart_game() -> Result<String, JsError> {
    Ok(api::restart_game()?)
}

#[wasm_bindgen]
pub fn next_level(state: &str) -> Result<String, JsError> {
    Ok(api::next_level(state)?)
}

/// CSS class for a level's colour theme
#[wasm_bindgen]
pub fn theme_class(level: u32) -> String {
    Theme::for_level(level).css_class().to_string()
}
