//! Game state and player body
//!
//! Everything a host has to hand back to continue a game lives here; the
//! serialized form is built by `persistence::record`.

use glam::DVec2;

use super::level::{LevelPhase, Theme};
use super::maze::Maze;
use crate::records::RunRecords;
use crate::renderer::Frame;
use crate::{cell_center, heading_vector};

/// The player's body in maze space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Centre of the body (cell `(x, y)` spans `[x, x+1) x [y, y+1)`)
    pub pos: DVec2,
    /// Facing angle in radians, `[0, 2π)`; 0 looks along +X, π/2 along +Y
    pub heading: f64,
    /// Collision radius in cells
    pub radius: f64,
}

impl Player {
    /// Place a player at the centre of the maze start cell, facing an open corridor
    pub fn spawn(maze: &Maze, radius: f64) -> Self {
        Self {
            pos: cell_center(maze.start()),
            heading: initial_heading(maze),
            radius,
        }
    }

    /// Cell containing the body centre
    pub fn cell(&self) -> (i64, i64) {
        (self.pos.x.floor() as i64, self.pos.y.floor() as i64)
    }

    /// Unit vector the player is facing
    pub fn facing(&self) -> DVec2 {
        heading_vector(self.heading)
    }
}

/// First open direction out of the start cell (east, south, west, north)
fn initial_heading(maze: &Maze) -> f64 {
    let (sx, sy) = maze.start();
    let (sx, sy) = (sx as i64, sy as i64);
    let options = [
        ((1, 0), 0.0),
        ((0, 1), std::f64::consts::FRAC_PI_2),
        ((-1, 0), std::f64::consts::PI),
        ((0, -1), 3.0 * std::f64::consts::FRAC_PI_2),
    ];
    for ((dx, dy), heading) in options {
        if maze.is_open(sx + dx, sy + dy) {
            return heading;
        }
    }
    let to_goal = cell_center(maze.goal()) - cell_center(maze.start());
    crate::normalize_angle(to_goal.y.atan2(to_goal.x))
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed (below 2^53); every level maze is derived from it
    pub seed: u64,
    /// Current level, 1-based
    pub level: u32,
    pub maze: Maze,
    pub player: Player,
    pub phase: LevelPhase,
    /// Simulation seconds spent on this level
    pub level_time: f64,
    /// Ticks integrated on this level
    pub time_ticks: u64,
    pub records: RunRecords,
}

impl GameState {
    pub fn has_won(&self) -> bool {
        self.phase.has_won()
    }

    pub fn theme(&self) -> Theme {
        Theme::for_level(self.level)
    }

    pub fn frozen_frame(&self) -> Option<&Frame> {
        self.phase.frozen_frame()
    }

    /// Step distance from the player's cell to the goal, if the player stands on an open cell
    pub fn steps_to_goal(&self) -> Option<usize> {
        let (x, y) = self.player.cell();
        if x < 0 || y < 0 {
            return None;
        }
        self.maze.path_length(self.maze.goal(), (x as usize, y as usize))
    }
}
