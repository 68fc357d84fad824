//! Collision detection and response against the maze grid
//!
//! The player is a circle moving through unit square cells. A position is
//! legal when the circle overlaps no wall cell; moves that would end in an
//! illegal position are resolved by sliding along the blocking axis.

use glam::DVec2;

use super::maze::Maze;

/// Result of a movement attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Where the body ended up
    pub pos: DVec2,
    /// The X component of the move was dropped
    pub blocked_x: bool,
    /// The Y component of the move was dropped
    pub blocked_y: bool,
}

impl MoveResult {
    fn free(pos: DVec2) -> Self {
        Self {
            pos,
            blocked_x: false,
            blocked_y: false,
        }
    }

    /// Whether any part of the move was dropped
    pub fn blocked(&self) -> bool {
        self.blocked_x || self.blocked_y
    }
}

/// Check whether a circle overlaps the unit square of cell `(x, y)`
///
/// Touching the boundary exactly does not count as overlap.
#[inline]
pub fn circle_overlaps_cell(center: DVec2, radius: f64, (x, y): (i64, i64)) -> bool {
    let min = DVec2::new(x as f64, y as f64);
    let closest = center.clamp(min, min + DVec2::ONE);
    (center - closest).length_squared() < radius * radius
}

/// Check whether a body at `pos` overlaps any wall cell
pub fn body_collides(maze: &Maze, pos: DVec2, radius: f64) -> bool {
    if !pos.is_finite() {
        return true;
    }
    let min_x = (pos.x - radius).floor() as i64;
    let max_x = (pos.x + radius).floor() as i64;
    let min_y = (pos.y - radius).floor() as i64;
    let max_y = (pos.y + radius).floor() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if maze.is_wall(x, y) && circle_overlaps_cell(pos, radius, (x, y)) {
                return true;
            }
        }
    }
    false
}

/// Move a body by `delta`, sliding along walls
///
/// The full move is tried first. If it collides, the X-only and then the
/// Y-only components are tried in turn and kept when they are clear, so a
/// diagonal push into a wall still slides along it. The returned position is
/// always collision-free when the starting position was.
pub fn slide_move(maze: &Maze, pos: DVec2, delta: DVec2, radius: f64) -> MoveResult {
    let target = pos + delta;
    if !body_collides(maze, target, radius) {
        return MoveResult::free(target);
    }

    let mut result = MoveResult {
        pos,
        blocked_x: false,
        blocked_y: false,
    };

    if delta.x != 0.0 {
        let x_only = DVec2::new(pos.x + delta.x, pos.y);
        if body_collides(maze, x_only, radius) {
            result.blocked_x = true;
        } else {
            result.pos = x_only;
        }
    }

    if delta.y != 0.0 {
        let y_only = DVec2::new(result.pos.x, result.pos.y + delta.y);
        if body_collides(maze, y_only, radius) {
            result.blocked_y = true;
        } else {
            result.pos = y_only;
        }
    }

    result
}

/// Move a body by `delta` in sub-steps no longer than its radius
///
/// A single `slide_move` only checks the destination, so a long move could
/// skip over a whole wall cell. Each sub-step slides on its own.
pub fn sweep_move(maze: &Maze, pos: DVec2, delta: DVec2, radius: f64) -> MoveResult {
    let steps = if radius > 0.0 {
        (delta.length() / radius).ceil().max(1.0) as usize
    } else {
        1
    };
    let step = delta / steps as f64;

    let mut result = MoveResult::free(pos);
    for _ in 0..steps {
        let moved = slide_move(maze, result.pos, step, radius);
        result.pos = moved.pos;
        result.blocked_x |= moved.blocked_x;
        result.blocked_y |= moved.blocked_y;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x3 grid: a single horizontal corridor from (1,1) to (3,1)
    fn corridor() -> Maze {
        let rows: Vec<String> = ["#####", "#...#", "#####"].iter().map(|s| s.to_string()).collect();
        Maze::from_rows(&rows, (1, 1), (3, 1)).unwrap()
    }

    #[test]
    fn test_circle_overlaps_cell() {
        assert!(circle_overlaps_cell(DVec2::new(1.5, 1.1), 0.2, (1, 0)));
        assert!(!circle_overlaps_cell(DVec2::new(1.5, 1.5), 0.2, (1, 0)));
        // Corner distance is sqrt(0.02) ~ 0.141
        assert!(circle_overlaps_cell(DVec2::new(1.1, 1.1), 0.2, (0, 0)));
        assert!(!circle_overlaps_cell(DVec2::new(1.2, 1.2), 0.2, (0, 0)));
    }

    #[test]
    fn test_body_collides_in_corridor() {
        let maze = corridor();
        assert!(!body_collides(&maze, DVec2::new(1.5, 1.5), 0.2));
        assert!(!body_collides(&maze, DVec2::new(3.5, 1.5), 0.2));
        assert!(body_collides(&maze, DVec2::new(1.5, 1.25), 0.3));
        assert!(body_collides(&maze, DVec2::new(3.9, 1.5), 0.2));
        assert!(body_collides(&maze, DVec2::new(f64::NAN, 1.5), 0.2));
    }

    #[test]
    fn test_free_move() {
        let maze = corridor();
        let result = slide_move(&maze, DVec2::new(1.5, 1.5), DVec2::new(0.5, 0.0), 0.2);
        assert!(!result.blocked());
        assert!((result.pos.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_slides_along_wall() {
        let maze = corridor();
        // Push diagonally into the top wall: X survives, Y is dropped
        let result = slide_move(&maze, DVec2::new(1.5, 1.5), DVec2::new(0.1, -0.4), 0.2);
        assert!(result.blocked_y);
        assert!(!result.blocked_x);
        assert!((result.pos.x - 1.6).abs() < 1e-12);
        assert!((result.pos.y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_stops_at_dead_end() {
        let maze = corridor();
        let result = slide_move(&maze, DVec2::new(3.5, 1.5), DVec2::new(0.4, 0.0), 0.2);
        assert!(result.blocked_x);
        assert_eq!(result.pos, DVec2::new(3.5, 1.5));
    }

    #[test]
    fn test_sweep_cannot_cross_thin_wall() {
        // Two pockets split by the wall cell at (3,1)
        let rows: Vec<String> = ["#######", "#..#..#", "#######"].iter().map(|s| s.to_string()).collect();
        let maze = Maze::from_rows(&rows, (1, 1), (5, 1)).unwrap();
        let start = DVec2::new(1.5, 1.5);
        let delta = DVec2::new(3.0, 0.0);

        // A single destination check lands on the far side
        assert_eq!(slide_move(&maze, start, delta, 0.2).pos, DVec2::new(4.5, 1.5));

        let result = sweep_move(&maze, start, delta, 0.2);
        assert!(result.blocked_x);
        assert!(result.pos.x <= 3.0 - 0.2 + 1e-9);
        assert!(!body_collides(&maze, result.pos, 0.2));
    }

    #[test]
    fn test_sweep_matches_short_free_move() {
        let maze = corridor();
        let result = sweep_move(&maze, DVec2::new(1.5, 1.5), DVec2::new(0.15, 0.0), 0.2);
        assert!(!result.blocked());
        assert!((result.pos.x - 1.65).abs() < 1e-12);
    }
}
