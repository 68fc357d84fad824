//! Simulation tick
//!
//! Integrates one input record into the game state: turning, movement with
//! wall sliding, level timing and the win check.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_overlaps_cell, sweep_move};
use super::level;
use super::state::GameState;
use crate::consts::MIN_DELTA_TIME;
use crate::error::{EngineError, EngineResult};
use crate::settings::Settings;
use crate::{heading_vector, normalize_angle};

/// Input for a single tick
///
/// Every field is required on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    /// Strafe left
    #[serde(rename = "left")]
    pub strafe_left: bool,
    /// Strafe right
    #[serde(rename = "right")]
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Horizontal pointer motion since the last tick; positive turns right
    pub mouse_delta_x: f64,
    /// Seconds elapsed since the last tick
    pub delta_time: f64,
}

impl TickInput {
    /// No keys, no mouse motion
    pub fn idle(delta_time: f64) -> Self {
        Self {
            forward: false,
            backward: false,
            strafe_left: false,
            strafe_right: false,
            turn_left: false,
            turn_right: false,
            mouse_delta_x: 0.0,
            delta_time,
        }
    }

    /// Reject values that cannot be integrated
    pub fn validate(&self) -> EngineResult<()> {
        if !self.delta_time.is_finite() {
            return Err(EngineError::InvalidInput(format!("delta_time {} is not finite", self.delta_time)));
        }
        if !self.mouse_delta_x.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "mouse_delta_x {} is not finite",
                self.mouse_delta_x
            )));
        }
        Ok(())
    }

    /// Desired movement direction in maze space for a given heading (length ≤ 1)
    pub fn wish_direction(&self, heading: f64) -> DVec2 {
        let forward = heading_vector(heading);
        // +π/2 is to the player's right (Y grows downward on screen)
        let right = DVec2::new(-forward.y, forward.x);
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f64;

        let wish = forward * axis(self.forward, self.backward) + right * axis(self.strafe_right, self.strafe_left);
        if wish.length_squared() > 1.0 { wish.normalize() } else { wish }
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Level already won; the state was left untouched
    Frozen,
    /// Simulation advanced
    Advanced,
    /// Simulation advanced and the goal was reached this tick
    Won,
}

/// Clamp a raw elapsed time into the range a tick integrates
pub fn effective_delta(raw: f64, settings: &Settings) -> f64 {
    if raw > MIN_DELTA_TIME { raw.min(settings.max_delta_time) } else { MIN_DELTA_TIME }
}

/// Advance the game state by one input record
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) -> EngineResult<TickOutcome> {
    input.validate()?;

    if state.has_won() {
        return Ok(TickOutcome::Frozen);
    }

    let dt = effective_delta(input.delta_time, settings);

    // Turning
    let mut heading = state.player.heading;
    if input.turn_left {
        heading -= settings.turn_speed * dt;
    }
    if input.turn_right {
        heading += settings.turn_speed * dt;
    }
    heading += input.mouse_delta_x * settings.mouse_sensitivity;
    state.player.heading = normalize_angle(heading);

    // Movement
    let delta = input.wish_direction(state.player.heading) * settings.move_speed * dt;
    if delta != DVec2::ZERO {
        let moved = sweep_move(&state.maze, state.player.pos, delta, state.player.radius);
        state.player.pos = moved.pos;
    }

    state.level_time += dt;
    state.time_ticks += 1;

    let goal = state.maze.goal();
    if circle_overlaps_cell(state.player.pos, state.player.radius, (goal.0 as i64, goal.1 as i64)) {
        level::complete_level(state);
        return Ok(TickOutcome::Won);
    }
    Ok(TickOutcome::Advanced)
}
