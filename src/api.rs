//! Opaque JSON boundary
//!
//! Hosts hold the game state as an opaque JSON string and hand it back on
//! every call. Each call decodes, runs one engine operation and re-encodes.
//! Malformed input is always an error; nothing is silently defaulted.

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::persistence;
use crate::sim::TickInput;

/// Parse a JSON input record
pub fn decode_input(json: &str) -> EngineResult<TickInput> {
    let input: TickInput = serde_json::from_str(json).map_err(EngineError::MalformedInput)?;
    input.validate()?;
    Ok(input)
}

/// String-in, string-out view of an `Engine`
#[derive(Debug, Clone, Default)]
pub struct Api {
    engine: Engine,
}

impl Api {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Serialized state of a new game
    pub fn init_game(&self) -> EngineResult<String> {
        persistence::encode(&self.engine.init())
    }

    /// Apply one input record and return the new state
    pub fn update_game(&self, state_json: &str, input_json: &str) -> EngineResult<String> {
        let mut state = persistence::decode(state_json)?;
        let input = decode_input(input_json)?;
        self.engine.tick(&mut state, &input)?;
        persistence::encode(&state)
    }

    /// Render a frame; returns the frame text and the (possibly updated) state
    pub fn render_frame(&self, state_json: &str, width: i64, height: i64) -> EngineResult<(String, String)> {
        let mut state = persistence::decode(state_json)?;
        let frame = self.engine.render(&mut state, width, height);
        Ok((frame.to_string(), persistence::encode(&state)?))
    }

    /// Serialized state of a fresh run
    pub fn restart_game(&self) -> EngineResult<String> {
        persistence::encode(&self.engine.restart())
    }

    /// Advance a won level; a level still in play comes back unchanged
    pub fn next_level(&self, state_json: &str) -> EngineResult<String> {
        let state = persistence::decode(state_json)?;
        persistence::encode(&self.engine.next_level(state))
    }
}

pub fn init_game() -> EngineResult<String> {
    Api::default().init_game()
}

pub fn update_game(state_json: &str, input_json: &str) -> EngineResult<String> {
    Api::default().update_game(state_json, input_json)
}

pub fn render_frame(state_json: &str, width: i64, height: i64) -> EngineResult<(String, String)> {
    Api::default().render_frame(state_json, width, height)
}

pub fn restart_game() -> EngineResult<String> {
    Api::default().restart_game()
}

pub fn next_level(state_json: &str) -> EngineResult<String> {
    Api::default().next_level(state_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: &str = r#"{"forward":true,"backward":false,"left":false,"right":false,
        "turn_left":false,"turn_right":false,"mouse_delta_x":0.0,"delta_time":0.016}"#;

    #[test]
    fn test_init_and_update() {
        let state = init_game().unwrap();
        let next = update_game(&state, FORWARD).unwrap();
        let decoded = persistence::decode(&next).unwrap();
        assert_eq!(decoded.time_ticks, 1);
        assert_eq!(decoded.level, 1);
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let state = init_game().unwrap();
        assert!(matches!(update_game(&state, "{}"), Err(EngineError::MalformedInput(_))));
        assert!(matches!(update_game(&state, "nope"), Err(EngineError::MalformedInput(_))));
        assert!(matches!(update_game("nope", FORWARD), Err(EngineError::MalformedState(_))));
    }

    #[test]
    fn test_render_frame_shape() {
        let state = init_game().unwrap();
        let (frame, after) = render_frame(&state, 30, 10).unwrap();
        let lines: Vec<&str> = frame.split_terminator('\n').collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 30));
        assert_eq!(after, state);
    }

    #[test]
    fn test_render_frame_rejects_bad_state() {
        assert!(render_frame("{}", 30, 10).is_err());
    }

    #[test]
    fn test_next_level_while_playing_is_noop() {
        let state = init_game().unwrap();
        assert_eq!(next_level(&state).unwrap(), state);
    }

    #[test]
    fn test_restart_game_is_level_one() {
        let state = persistence::decode(&restart_game().unwrap()).unwrap();
        assert_eq!(state.level, 1);
        assert!(!state.has_won());
    }
}
