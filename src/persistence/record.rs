//! Flat state record
//!
//! The serialized form of a `GameState`. The record is plain data: no enums
//! with payloads, no references, so any JSON-capable host can store it. Decoding
//! re-checks every invariant the simulation relies on.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_COUNT, SEED_MASK, STATE_VERSION};
use crate::error::{EngineError, EngineResult};
use crate::records::RunRecords;
use crate::renderer::Frame;
use crate::sim::collision::body_collides;
use crate::sim::level::{LevelPhase, Theme};
use crate::sim::maze::{Maze, rooms_for_level};
use crate::sim::state::{GameState, Player};

/// Player body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerRecord {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub radius: f64,
}

/// Maze grid as text rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MazeRecord {
    pub width: usize,
    pub height: usize,
    pub start: [usize; 2],
    pub goal: [usize; 2],
    pub rows: Vec<String>,
}

/// Complete serialized game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateRecord {
    pub version: u32,
    pub seed: u64,
    pub level: u32,
    /// Theme name, informational for hosts (must match the level)
    pub theme: String,
    pub has_won: bool,
    pub level_time: f64,
    pub time_ticks: u64,
    pub player: PlayerRecord,
    pub maze: MazeRecord,
    /// Pinned victory frame rows, present only once a won level has rendered
    pub frozen_frame: Option<Vec<String>>,
    pub records: RunRecords,
}

/// Header read first so version mismatches are reported before full parsing
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

impl From<&GameState> for StateRecord {
    fn from(state: &GameState) -> Self {
        let maze = &state.maze;
        Self {
            version: STATE_VERSION,
            seed: state.seed,
            level: state.level,
            theme: state.theme().name().to_string(),
            has_won: state.has_won(),
            level_time: state.level_time,
            time_ticks: state.time_ticks,
            player: PlayerRecord {
                x: state.player.pos.x,
                y: state.player.pos.y,
                heading: state.player.heading,
                radius: state.player.radius,
            },
            maze: MazeRecord {
                width: maze.width(),
                height: maze.height(),
                start: [maze.start().0, maze.start().1],
                goal: [maze.goal().0, maze.goal().1],
                rows: maze.to_rows(),
            },
            frozen_frame: state.frozen_frame().map(Frame::rows),
            records: state.records.clone(),
        }
    }
}

impl TryFrom<StateRecord> for GameState {
    type Error = EngineError;

    fn try_from(record: StateRecord) -> EngineResult<Self> {
        if record.version != STATE_VERSION {
            return Err(EngineError::UnsupportedVersion {
                found: record.version,
                expected: STATE_VERSION,
            });
        }
        if record.seed > SEED_MASK {
            return Err(EngineError::invalid_state(format!("seed {} exceeds 53 bits", record.seed)));
        }
        if !(1..=LEVEL_COUNT).contains(&record.level) {
            return Err(EngineError::invalid_state(format!(
                "level {} outside 1..={}",
                record.level, LEVEL_COUNT
            )));
        }
        let theme = Theme::for_level(record.level);
        if record.theme != theme.name() {
            return Err(EngineError::invalid_state(format!(
                "theme {:?} does not belong to level {}",
                record.theme, record.level
            )));
        }
        if !record.level_time.is_finite() || record.level_time < 0.0 {
            return Err(EngineError::invalid_state("level_time must be a non-negative number"));
        }

        let maze = decode_maze(&record.maze, record.level)?;
        let player = decode_player(&record.player, &maze)?;

        let phase = match (record.has_won, record.frozen_frame) {
            (false, None) => LevelPhase::Playing,
            (false, Some(_)) => {
                return Err(EngineError::invalid_state("frozen frame present on a level not yet won"));
            }
            (true, frozen) => LevelPhase::Won {
                frozen: frozen.as_deref().map(Frame::from_rows).transpose()?,
            },
        };

        record.records.validate()?;

        Ok(GameState {
            seed: record.seed,
            level: record.level,
            maze,
            player,
            phase,
            level_time: record.level_time,
            time_ticks: record.time_ticks,
            records: record.records,
        })
    }
}

fn decode_maze(record: &MazeRecord, level: u32) -> EngineResult<Maze> {
    let expected = 2 * rooms_for_level(level) + 1;
    if record.width != expected || record.height != expected {
        return Err(EngineError::invalid_state(format!(
            "maze {}x{} does not match level {} ({}x{})",
            record.width, record.height, level, expected, expected
        )));
    }
    let maze = Maze::from_rows(
        &record.rows,
        (record.start[0], record.start[1]),
        (record.goal[0], record.goal[1]),
    )?;
    if maze.width() != record.width || maze.height() != record.height {
        return Err(EngineError::invalid_state("maze rows do not match the declared size"));
    }
    if maze.path_length(maze.start(), maze.goal()).is_none() {
        return Err(EngineError::invalid_state("goal is unreachable from start"));
    }
    Ok(maze)
}

fn decode_player(record: &PlayerRecord, maze: &Maze) -> EngineResult<Player> {
    let pos = DVec2::new(record.x, record.y);
    if !pos.is_finite() || !record.heading.is_finite() || !record.radius.is_finite() {
        return Err(EngineError::invalid_state("player values must be finite"));
    }
    if !(0.0..std::f64::consts::TAU).contains(&record.heading) {
        return Err(EngineError::invalid_state(format!("heading {} outside [0, 2π)", record.heading)));
    }
    if !(record.radius > 0.0 && record.radius < 0.5) {
        return Err(EngineError::invalid_state(format!("player radius {} outside (0, 0.5)", record.radius)));
    }
    if body_collides(maze, pos, record.radius) {
        return Err(EngineError::invalid_state(format!(
            "player at ({}, {}) overlaps a wall",
            record.x, record.y
        )));
    }
    Ok(Player {
        pos,
        heading: record.heading,
        radius: record.radius,
    })
}

/// Serialize a game state to its JSON record
pub fn encode(state: &GameState) -> EngineResult<String> {
    serde_json::to_string(&StateRecord::from(state)).map_err(EngineError::Encode)
}

/// Parse and validate a JSON state record
pub fn decode(json: &str) -> EngineResult<GameState> {
    let header: VersionHeader = serde_json::from_str(json).map_err(EngineError::MalformedState)?;
    if header.version != STATE_VERSION {
        return Err(EngineError::UnsupportedVersion {
            found: header.version,
            expected: STATE_VERSION,
        });
    }
    let record: StateRecord = serde_json::from_str(json).map_err(EngineError::MalformedState)?;
    GameState::try_from(record)
}
