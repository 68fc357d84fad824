//! ASCII Maze - a first-person text-rendered maze engine
//!
//! Core modules:
//! - `sim`: Maze generation, player physics, level state machine
//! - `renderer`: Raycasting into a fixed-size character frame
//! - `persistence`: Versioned flat state record crossing the host boundary
//! - `engine` / `api`: Typed facade and the opaque JSON boundary
//! - `platform`: wasm32 bindings for browser hosts

pub mod api;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use records::RunRecords;
pub use renderer::{Frame, Viewport};
pub use settings::{DepthPreset, Settings};
pub use sim::{GameState, TickInput};

use glam::DVec2;

/// Engine configuration constants
pub mod consts {
    /// Number of levels before the game wraps back to level 1
    pub const LEVEL_COUNT: u32 = 5;
    /// Room lattice size of level 1 (grid is `2 * rooms + 1` cells wide)
    pub const BASE_ROOMS: usize = 4;
    /// Largest grid dimension any level can produce
    pub const MAX_GRID_DIM: usize = 2 * (BASE_ROOMS + LEVEL_COUNT as usize - 1) + 1;

    /// Version tag written into every serialized state
    pub const STATE_VERSION: u32 = 1;

    /// Smallest elapsed time a tick will integrate
    pub const MIN_DELTA_TIME: f64 = 1.0e-4;

    /// Viewport limits (characters)
    pub const MIN_VIEW_WIDTH: usize = 8;
    pub const MIN_VIEW_HEIGHT: usize = 4;
    pub const MAX_VIEW_WIDTH: usize = 400;
    pub const MAX_VIEW_HEIGHT: usize = 200;

    /// Flashing start banner cycle (seconds) and visible share of the cycle
    pub const BANNER_FLASH_CYCLE: f64 = 0.8;
    pub const BANNER_FLASH_DUTY: f64 = 0.625;

    /// Seeds are kept below 2^53 so JS hosts can hold them in a double
    pub const SEED_MASK: u64 = (1 << 53) - 1;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f64::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed difference `to - from`, wrapped to [-π, π)
#[inline]
pub fn angle_delta(from: f64, to: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Unit vector pointing along `heading`
#[inline]
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}

/// Center of grid cell `(x, y)` in continuous maze coordinates
#[inline]
pub fn cell_center(cell: (usize, usize)) -> DVec2 {
    DVec2::new(cell.0 as f64 + 0.5, cell.1 as f64 + 0.5)
}
