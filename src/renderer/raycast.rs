//! Grid raycasting (digital differential analysis)
//!
//! A ray walks cell boundaries in order of distance until it enters a wall
//! cell. The walk is bounded by `width + height` crossings, which is more than
//! any ray starting inside the grid can make before leaving it.

use glam::DVec2;

use crate::heading_vector;
use crate::sim::Maze;

/// Which kind of grid line the ray crossed when it hit the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// A line of constant X (east/west wall face)
    Vertical,
    /// A line of constant Y (north/south wall face)
    Horizontal,
}

/// Result of casting one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray to the wall face
    pub distance: f64,
    pub side: Side,
    /// The wall cell that was hit
    pub cell: (i64, i64),
    /// Distances along the ray where it enters and leaves the goal cell
    pub goal_span: Option<(f64, f64)>,
}

/// Cast a ray from `origin` along `angle`
pub fn cast_ray(maze: &Maze, origin: DVec2, angle: f64) -> RayHit {
    let dir = heading_vector(angle);
    let mut map = (origin.x.floor() as i64, origin.y.floor() as i64);

    // Distance along the ray between successive X (or Y) grid lines
    let delta_x = if dir.x == 0.0 { f64::INFINITY } else { dir.x.recip().abs() };
    let delta_y = if dir.y == 0.0 { f64::INFINITY } else { dir.y.recip().abs() };

    let (step_x, mut side_x) = if dir.x < 0.0 {
        (-1, (origin.x - map.0 as f64) * delta_x)
    } else {
        (1, (map.0 as f64 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y < 0.0 {
        (-1, (origin.y - map.1 as f64) * delta_y)
    } else {
        (1, (map.1 as f64 + 1.0 - origin.y) * delta_y)
    };

    let goal = (maze.goal().0 as i64, maze.goal().1 as i64);
    let mut goal_span = None;
    let mut entered_at = 0.0;
    let mut side = Side::Vertical;

    for _ in 0..maze.width() + maze.height() {
        let crossing = if side_x < side_y {
            let t = side_x;
            side_x += delta_x;
            map.0 += step_x;
            side = Side::Vertical;
            t
        } else {
            let t = side_y;
            side_y += delta_y;
            map.1 += step_y;
            side = Side::Horizontal;
            t
        };

        let left = match side {
            Side::Vertical => (map.0 - step_x, map.1),
            Side::Horizontal => (map.0, map.1 - step_y),
        };
        if left == goal {
            goal_span = Some((entered_at, crossing));
        }
        entered_at = crossing;

        if maze.is_wall(map.0, map.1) {
            return RayHit {
                distance: crossing,
                side,
                cell: map,
                goal_span,
            };
        }
    }

    // Every cell outside the grid is wall, so a ray from inside never gets here
    RayHit {
        distance: entered_at,
        side,
        cell: map,
        goal_span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// 7x3 corridor: start at (1,1), goal at (5,1)
    fn corridor() -> Maze {
        let rows: Vec<String> = ["#######", "#.....#", "#######"].iter().map(|s| s.to_string()).collect();
        Maze::from_rows(&rows, (1, 1), (5, 1)).unwrap()
    }

    #[test]
    fn test_hits_far_wall() {
        let hit = cast_ray(&corridor(), DVec2::new(1.5, 1.5), 0.0);
        assert!((hit.distance - 4.5).abs() < 1e-9);
        assert_eq!(hit.side, Side::Vertical);
        assert_eq!(hit.cell, (6, 1));
    }

    #[test]
    fn test_hits_side_wall() {
        let hit = cast_ray(&corridor(), DVec2::new(1.5, 1.5), FRAC_PI_2);
        assert!((hit.distance - 0.5).abs() < 1e-9);
        assert_eq!(hit.side, Side::Horizontal);
        assert_eq!(hit.cell, (1, 2));
    }

    #[test]
    fn test_goal_span() {
        let hit = cast_ray(&corridor(), DVec2::new(1.5, 1.5), 0.0);
        let (enter, exit) = hit.goal_span.unwrap();
        assert!((enter - 3.5).abs() < 1e-9);
        assert!((exit - 4.5).abs() < 1e-9);

        let back = cast_ray(&corridor(), DVec2::new(1.5, 1.5), PI);
        assert!(back.goal_span.is_none());
    }

    #[test]
    fn test_goal_span_from_inside_goal() {
        let hit = cast_ray(&corridor(), DVec2::new(5.5, 1.5), PI);
        let (enter, exit) = hit.goal_span.unwrap();
        assert_eq!(enter, 0.0);
        assert!((exit - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_every_ray_terminates_in_generated_mazes() {
        for seed in 0..5 {
            let maze = crate::sim::generate(5, seed);
            let origin = crate::cell_center(maze.start());
            for i in 0..64 {
                let hit = cast_ray(&maze, origin, i as f64 * std::f64::consts::TAU / 64.0);
                assert!(hit.distance.is_finite() && hit.distance > 0.0);
                assert!(maze.is_wall(hit.cell.0, hit.cell.1));
            }
        }
    }
}
