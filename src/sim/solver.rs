//! Maze solving and the demo autopilot
//!
//! The autopilot walks the unique start-to-goal path by emitting ordinary
//! `TickInput`s, so it exercises exactly the code paths a human player does.

use std::collections::VecDeque;

use glam::DVec2;

use super::maze::Maze;
use super::state::GameState;
use super::tick::TickInput;
use crate::settings::Settings;
use crate::{angle_delta, cell_center};

/// Cells from start to goal, inclusive; empty if the goal is unreachable
pub fn solution_path(maze: &Maze) -> Vec<(usize, usize)> {
    let (width, height) = (maze.width(), maze.height());
    let index = |(x, y): (usize, usize)| y * width + x;
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; width * height];
    let mut seen = vec![false; width * height];

    let start = maze.start();
    let goal = maze.goal();
    let mut queue = VecDeque::from([start]);
    seen[index(start)] = true;

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            break;
        }
        for next in maze.open_neighbors(cell) {
            if !seen[index(next)] {
                seen[index(next)] = true;
                parent[index(next)] = Some(cell);
                queue.push_back(next);
            }
        }
    }

    if !seen[index(goal)] {
        return Vec::new();
    }
    let mut path = vec![goal];
    let mut cell = goal;
    while let Some(prev) = parent[index(cell)] {
        path.push(prev);
        cell = prev;
    }
    path.reverse();
    path
}

/// Steers the player along the solution path
#[derive(Debug, Clone)]
pub struct Autopilot {
    waypoints: Vec<DVec2>,
    next: usize,
}

impl Autopilot {
    pub fn new(maze: &Maze) -> Self {
        Self {
            waypoints: solution_path(maze).into_iter().map(cell_center).collect(),
            next: 1,
        }
    }

    /// Remaining waypoints
    pub fn remaining(&self) -> usize {
        self.waypoints.len().saturating_sub(self.next)
    }

    /// Input that moves the player toward the next waypoint
    pub fn steer(&mut self, state: &GameState, settings: &Settings, delta_time: f64) -> TickInput {
        let pos = state.player.pos;
        let reach = (settings.move_speed * delta_time).max(0.05);
        while self.next + 1 < self.waypoints.len() && self.waypoints[self.next].distance(pos) < reach {
            self.next += 1;
        }
        let Some(&target) = self.waypoints.get(self.next) else {
            return TickInput::idle(delta_time);
        };

        let to_target = target - pos;
        let turn = angle_delta(state.player.heading, to_target.y.atan2(to_target.x));
        let mut input = TickInput {
            forward: true,
            ..TickInput::idle(delta_time)
        };
        if settings.mouse_sensitivity > 0.0 {
            input.mouse_delta_x = turn / settings.mouse_sensitivity;
        } else {
            input.turn_left = turn < 0.0;
            input.turn_right = turn > 0.0;
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::new_game;
    use crate::sim::tick::{TickOutcome, tick};

    #[test]
    fn test_solution_path_is_connected() {
        for seed in 0..10 {
            let state = new_game(seed, &Settings::default());
            let path = solution_path(&state.maze);
            assert_eq!(path.first(), Some(&state.maze.start()));
            assert_eq!(path.last(), Some(&state.maze.goal()));
            assert_eq!(Some(path.len() - 1), state.maze.path_length(state.maze.start(), state.maze.goal()));
            for pair in path.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
            }
        }
    }

    #[test]
    fn test_autopilot_reaches_goal() {
        let settings = Settings::default();
        let dt = 1.0 / 30.0;
        for seed in 0..5 {
            let mut state = new_game(seed, &settings);
            let mut pilot = Autopilot::new(&state.maze);
            let path_cells = solution_path(&state.maze).len() as f64;
            let budget = (2.0 * path_cells / (settings.move_speed * dt)) as usize + 100;

            let mut won = false;
            for _ in 0..budget {
                let input = pilot.steer(&state, &settings, dt);
                if tick(&mut state, &input, &settings).unwrap() == TickOutcome::Won {
                    won = true;
                    break;
                }
            }
            assert!(won, "seed {} did not reach the goal in {} ticks", seed, budget);
        }
    }
}
