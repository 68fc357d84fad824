//! Perfect maze generation
//!
//! Mazes live on a `(2 * cols + 1) x (2 * rows + 1)` cell grid: rooms sit on
//! odd coordinates, the cells between two rooms are passages, and the border
//! is always wall. Carving is a randomized depth-first backtracker over the
//! room lattice, so the open cells form a spanning tree: every open cell is
//! reachable from the start and there is exactly one path between any two.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{BASE_ROOMS, LEVEL_COUNT};
use crate::error::{EngineError, EngineResult};

/// Glyph used for wall cells in the text form of a maze
pub const WALL_GLYPH: char = '#';
/// Glyph used for open cells in the text form of a maze
pub const OPEN_GLYPH: char = '.';

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

/// A carved maze with its designated start and goal cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: (usize, usize),
    goal: (usize, usize),
}

/// Room lattice size for a level (levels past the table reuse the last size)
pub fn rooms_for_level(level: u32) -> usize {
    let level = level.clamp(1, LEVEL_COUNT) as usize;
    BASE_ROOMS + level - 1
}

/// Deterministic per-level seed derived from the run seed
pub fn level_seed(run_seed: u64, level: u32) -> u64 {
    (level as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(run_seed)
        .rotate_left(17)
}

/// Generate the maze for `level` of the run seeded with `run_seed`
pub fn generate(level: u32, run_seed: u64) -> Maze {
    let rooms = rooms_for_level(level);
    let mut rng = Pcg32::seed_from_u64(level_seed(run_seed, level));
    let maze = Maze::carve(rooms, rooms, &mut rng);
    log::info!(
        "Level {} maze {}x{} (seed {}), goal {:?} at distance {}",
        level,
        maze.width,
        maze.height,
        run_seed,
        maze.goal,
        maze.path_length(maze.start, maze.goal).unwrap_or(0)
    );
    maze
}

impl Maze {
    /// Carve a `cols x rows` room lattice with the given RNG
    pub fn carve<R: Rng>(cols: usize, rows: usize, rng: &mut R) -> Self {
        assert!(cols > 0 && rows > 0, "maze needs at least one room");

        let width = 2 * cols + 1;
        let height = 2 * rows + 1;
        let mut maze = Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
            start: (1, 1),
            goal: (1, 1),
        };

        let mut visited = vec![false; cols * rows];
        let mut stack = vec![(0usize, 0usize)];
        visited[0] = true;
        maze.set(1, 1, Cell::Open);

        while let Some(&(cx, cy)) = stack.last() {
            let candidates: Vec<(usize, usize)> = room_neighbors(cx, cy, cols, rows)
                .into_iter()
                .flatten()
                .filter(|&(nx, ny)| !visited[ny * cols + nx])
                .collect();

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let (nx, ny) = candidates[rng.random_range(0..candidates.len())];
            // Passage between two rooms sits halfway between their grid cells
            maze.set(cx + nx + 1, cy + ny + 1, Cell::Open);
            maze.set(2 * nx + 1, 2 * ny + 1, Cell::Open);
            visited[ny * cols + nx] = true;
            stack.push((nx, ny));
        }

        debug_assert!(visited.iter().all(|&v| v), "backtracker left rooms uncarved");

        maze.goal = maze.farthest_from(maze.start);
        maze
    }

    /// Rebuild a maze from its text rows, validating every invariant we rely on
    pub fn from_rows(rows: &[String], start: (usize, usize), goal: (usize, usize)) -> EngineResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width < 3 || height < 3 {
            return Err(EngineError::invalid_state(format!(
                "maze must be at least 3x3, got {}x{}",
                width, height
            )));
        }
        if width > crate::consts::MAX_GRID_DIM || height > crate::consts::MAX_GRID_DIM {
            return Err(EngineError::invalid_state(format!(
                "maze {}x{} exceeds the {} cell cap",
                width,
                height,
                crate::consts::MAX_GRID_DIM
            )));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(EngineError::invalid_state(format!("maze row {} is not {} cells wide", y, width)));
            }
            for ch in row.chars() {
                cells.push(match ch {
                    WALL_GLYPH => Cell::Wall,
                    OPEN_GLYPH => Cell::Open,
                    other => {
                        return Err(EngineError::invalid_state(format!(
                            "unknown maze glyph {:?} in row {}",
                            other, y
                        )));
                    }
                });
            }
        }

        let maze = Self {
            width,
            height,
            cells,
            start,
            goal,
        };

        for (name, cell) in [("start", start), ("goal", goal)] {
            if !maze.is_open(cell.0 as i64, cell.1 as i64) {
                return Err(EngineError::invalid_state(format!(
                    "{} cell {:?} is not an open cell",
                    name, cell
                )));
            }
        }
        Ok(maze)
    }

    /// Text rows of the grid (`#` wall, `.` open)
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| match self.cells[y * self.width + x] {
                        Cell::Wall => WALL_GLYPH,
                        Cell::Open => OPEN_GLYPH,
                    })
                    .collect()
            })
            .collect()
    }

    /// Top-down map with `S`/`G` markers, for logs and the demo binary
    pub fn to_map(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if (x, y) == self.start {
                    'S'
                } else if (x, y) == self.goal {
                    'G'
                } else if self.cells[y * self.width + x] == Cell::Wall {
                    '█'
                } else {
                    ' '
                });
            }
            out.push('\n');
        }
        out
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn goal(&self) -> (usize, usize) {
        self.goal
    }

    /// Cell at signed coordinates; anything outside the grid is wall
    #[inline]
    pub fn cell(&self, x: i64, y: i64) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Cell::Wall;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    #[inline]
    pub fn is_wall(&self, x: i64, y: i64) -> bool {
        self.cell(x, y) == Cell::Wall
    }

    #[inline]
    pub fn is_open(&self, x: i64, y: i64) -> bool {
        self.cell(x, y) == Cell::Open
    }

    /// All open cells in row-major order
    pub fn open_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cells[y * self.width + x] == Cell::Open)
    }

    /// Open 4-neighbors of a cell
    pub fn open_neighbors(&self, (x, y): (usize, usize)) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (x, y) = (x as i64, y as i64);
        [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
            .into_iter()
            .filter(|&(nx, ny)| self.is_open(nx, ny))
            .map(|(nx, ny)| (nx as usize, ny as usize))
    }

    /// Breadth-first step distance from `from` to every cell (`None` = unreachable or wall)
    pub fn distances_from(&self, from: (usize, usize)) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.width * self.height];
        if !self.is_open(from.0 as i64, from.1 as i64) {
            return dist;
        }
        let mut queue = VecDeque::new();
        dist[from.1 * self.width + from.0] = Some(0);
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            let d = dist[cell.1 * self.width + cell.0].unwrap_or(0);
            for next in self.open_neighbors(cell) {
                let slot = &mut dist[next.1 * self.width + next.0];
                if slot.is_none() {
                    *slot = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    /// Step count of the path between two cells, if connected
    pub fn path_length(&self, from: (usize, usize), to: (usize, usize)) -> Option<usize> {
        if to.0 >= self.width || to.1 >= self.height {
            return None;
        }
        self.distances_from(from)[to.1 * self.width + to.0]
    }

    /// Open cell with the largest graph distance from `from` (first in row-major order on ties)
    fn farthest_from(&self, from: (usize, usize)) -> (usize, usize) {
        let dist = self.distances_from(from);
        let mut best = (from, 0);
        for (i, d) in dist.iter().enumerate() {
            if let Some(d) = *d {
                if d > best.1 {
                    best = ((i % self.width, i / self.width), d);
                }
            }
        }
        best.0
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.width + x] = cell;
    }
}

/// Lattice neighbors of a room, in a fixed order so carving is reproducible
fn room_neighbors(x: usize, y: usize, cols: usize, rows: usize) -> [Option<(usize, usize)>; 4] {
    let down = if y + 1 < rows { Some((x, y + 1)) } else { None };
    let up = if y > 0 { Some((x, y - 1)) } else { None };
    let left = if x > 0 { Some((x - 1, y)) } else { None };
    let right = if x + 1 < cols { Some((x + 1, y)) } else { None };
    [down, up, left, right]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_neighbors() {
        assert_eq!(room_neighbors(0, 0, 4, 4), [Some((0, 1)), None, None, Some((1, 0))]);
        assert_eq!(
            room_neighbors(1, 1, 4, 4),
            [Some((1, 2)), Some((1, 0)), Some((0, 1)), Some((2, 1))]
        );
        assert_eq!(room_neighbors(3, 3, 4, 4), [None, Some((3, 2)), Some((2, 3)), None]);
    }

    #[test]
    fn test_every_level_is_fully_connected() {
        for level in 1..=LEVEL_COUNT {
            for seed in [0u64, 7, 12345, 987654321] {
                let maze = generate(level, seed);
                let dist = maze.distances_from(maze.start());
                for (x, y) in maze.open_cells() {
                    assert!(
                        dist[y * maze.width() + x].is_some(),
                        "level {} seed {}: open cell {:?} unreachable",
                        level,
                        seed,
                        (x, y)
                    );
                }
                assert!(maze.path_length(maze.start(), maze.goal()).unwrap() >= 1);
            }
        }
    }

    #[test]
    fn test_open_cells_form_a_tree() {
        for level in 1..=LEVEL_COUNT {
            let maze = generate(level, 42);
            let open: Vec<_> = maze.open_cells().collect();
            // Count each undirected edge once (right and down neighbors only)
            let edges: usize = open
                .iter()
                .map(|&(x, y)| {
                    maze.is_open(x as i64 + 1, y as i64) as usize + maze.is_open(x as i64, y as i64 + 1) as usize
                })
                .sum();
            assert_eq!(edges, open.len() - 1, "level {} has a loop", level);
        }
    }

    #[test]
    fn test_border_is_solid() {
        let maze = generate(3, 99);
        for x in 0..maze.width() {
            assert!(maze.is_wall(x as i64, 0));
            assert!(maze.is_wall(x as i64, maze.height() as i64 - 1));
        }
        for y in 0..maze.height() {
            assert!(maze.is_wall(0, y as i64));
            assert!(maze.is_wall(maze.width() as i64 - 1, y as i64));
        }
        assert!(maze.is_wall(-1, 3));
        assert!(maze.is_wall(3, maze.height() as i64 + 4));
    }

    #[test]
    fn test_goal_is_farthest_cell() {
        let maze = generate(4, 2024);
        let dist = maze.distances_from(maze.start());
        let max = dist.iter().flatten().copied().max().unwrap();
        assert_eq!(maze.path_length(maze.start(), maze.goal()), Some(max));
        assert_ne!(maze.goal(), maze.start());
    }

    #[test]
    fn test_size_grows_with_level_and_caps() {
        let mut last = 0;
        for level in 1..=LEVEL_COUNT {
            let maze = generate(level, 1);
            assert!(maze.width() > last);
            assert_eq!(maze.width(), maze.height());
            last = maze.width();
        }
        assert_eq!(last, crate::consts::MAX_GRID_DIM);
        assert_eq!(rooms_for_level(LEVEL_COUNT + 10), rooms_for_level(LEVEL_COUNT));
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        assert_eq!(generate(2, 555), generate(2, 555));
        let a = generate(5, 1);
        let differs = (2..10).any(|seed| generate(5, seed) != a);
        assert!(differs);
    }

    #[test]
    fn test_rows_round_trip() {
        let maze = generate(1, 77);
        let rebuilt = Maze::from_rows(&maze.to_rows(), maze.start(), maze.goal()).unwrap();
        assert_eq!(rebuilt, maze);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        let maze = generate(1, 77);
        let mut rows = maze.to_rows();
        rows[2].replace_range(0..1, "x");
        assert!(Maze::from_rows(&rows, maze.start(), maze.goal()).is_err());

        let rows = maze.to_rows();
        assert!(Maze::from_rows(&rows, (0, 0), maze.goal()).is_err());

        let mut rows = maze.to_rows();
        rows[1].push('#');
        assert!(Maze::from_rows(&rows, maze.start(), maze.goal()).is_err());
    }

    #[test]
    fn test_map_marks_start_and_goal() {
        let maze = generate(1, 3);
        let map = maze.to_map();
        assert_eq!(map.matches('S').count(), 1);
        assert_eq!(map.matches('G').count(), 1);
        assert_eq!(map.lines().count(), maze.height());
    }
}
