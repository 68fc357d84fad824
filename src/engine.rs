//! Typed engine facade
//!
//! Owns the settings and routes each operation to the simulation or the
//! renderer. The victory-frame pinning happens here, so `renderer::render`
//! stays a pure function of state.

use crate::consts::SEED_MASK;
use crate::error::EngineResult;
use crate::renderer::{self, Frame, Viewport};
use crate::settings::Settings;
use crate::sim::{self, GameState, TickInput, TickOutcome};

/// Fresh run seed from the OS RNG
pub fn random_seed() -> u64 {
    rand::random::<u64>() & SEED_MASK
}

/// The maze engine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    settings: Settings,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: settings.sanitized(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// New game at level 1 with a random seed
    pub fn init(&self) -> GameState {
        self.init_with_seed(random_seed())
    }

    pub fn init_with_seed(&self, seed: u64) -> GameState {
        sim::new_game(seed, &self.settings)
    }

    /// Integrate one input record
    pub fn tick(&self, state: &mut GameState, input: &TickInput) -> EngineResult<TickOutcome> {
        sim::tick(state, input, &self.settings)
    }

    /// Render the view, pinning the first frame rendered after a win
    ///
    /// Once pinned, the same frame is returned regardless of the requested
    /// size until the level changes.
    pub fn render(&self, state: &mut GameState, width: i64, height: i64) -> Frame {
        if let Some(frozen) = state.frozen_frame() {
            return frozen.clone();
        }
        let frame = renderer::render(state, Viewport::clamped(width, height), &self.settings);
        if state.phase.pin_frame(&frame) {
            log::debug!(
                "Pinned {}x{} victory frame for level {}",
                frame.width(),
                frame.height(),
                state.level
            );
        }
        frame
    }

    /// Discard all progress: level 1, fresh records, random seed
    pub fn restart(&self) -> GameState {
        self.restart_with_seed(random_seed())
    }

    pub fn restart_with_seed(&self, seed: u64) -> GameState {
        sim::restart(seed, &self.settings)
    }

    /// Advance past a won level (unchanged if the level is still in play)
    pub fn next_level(&self, state: GameState) -> GameState {
        sim::next_level(state, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LEVEL_COUNT;
    use crate::sim::level::complete_level;

    #[test]
    fn test_random_seed_in_range() {
        for _ in 0..32 {
            assert!(random_seed() <= SEED_MASK);
        }
    }

    #[test]
    fn test_new_sanitizes_settings() {
        let engine = Engine::new(Settings {
            fov_degrees: 1000.0,
            ..Settings::default()
        });
        assert_eq!(engine.settings().fov_degrees, 120.0);
    }

    #[test]
    fn test_render_pins_after_win() {
        let engine = Engine::default();
        let mut state = engine.init_with_seed(3);
        let playing = engine.render(&mut state, 40, 12);
        assert!(state.frozen_frame().is_none());

        complete_level(&mut state);
        let pinned = engine.render(&mut state, 40, 12);
        assert_ne!(pinned, playing);
        assert_eq!(state.frozen_frame(), Some(&pinned));

        let resized = engine.render(&mut state, 120, 40);
        assert_eq!(resized, pinned);
        assert_eq!(resized.width(), 40);
    }

    #[test]
    fn test_next_level_clears_pinned_frame() {
        let engine = Engine::default();
        let mut state = engine.init_with_seed(3);
        complete_level(&mut state);
        engine.render(&mut state, 40, 12);
        let next = engine.next_level(state);
        assert_eq!(next.level, 2);
        assert!(next.frozen_frame().is_none());
    }

    #[test]
    fn test_full_run_wraps() {
        let engine = Engine::default();
        let mut state = engine.init_with_seed(3);
        for level in 1..=LEVEL_COUNT {
            assert_eq!(state.level, level);
            complete_level(&mut state);
            state = engine.next_level(state);
        }
        assert_eq!(state.level, 1);
        assert_ne!(state.seed, 3);
    }
}
