//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same state, input and settings a
//! tick always produces the same result:
//! - Seeded RNG only (maze carving)
//! - Time comes from input deltas, never the wall clock
//! - Stable iteration order everywhere

pub mod collision;
pub mod level;
pub mod maze;
pub mod solver;
pub mod state;
pub mod tick;

pub use collision::{MoveResult, body_collides, circle_overlaps_cell, slide_move, sweep_move};
pub use level::{LevelPhase, Theme, is_last_level, new_game, next_level, restart, start_level};
pub use maze::{Cell, Maze, generate, rooms_for_level};
pub use solver::{Autopilot, solution_path};
pub use state::{GameState, Player};
pub use tick::{TickInput, TickOutcome, tick};
