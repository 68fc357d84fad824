//! Level progression
//!
//! A level is either being played or has been won. Winning freezes the
//! simulation; the first frame rendered afterwards is pinned and returned for
//! every later render until the host advances to the next level.
//!
//! ```text
//! Playing --(body reaches goal cell)--> Won { frozen: None }
//! Won { None } --(first render)-------> Won { frozen: Some(frame) }
//! Won --(next_level)------------------> Playing (level + 1, or level 1 after the last)
//! any --(restart)---------------------> Playing (level 1, fresh records)
//! ```

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::maze;
use super::state::{GameState, Player};
use crate::consts::{LEVEL_COUNT, SEED_MASK};
use crate::records::RunRecords;
use crate::renderer::Frame;
use crate::settings::Settings;

/// Colour theme of a level (hosts use it to tint the frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Matrix,
    Glacier,
    Ember,
    Violet,
    Crimson,
}

impl Theme {
    pub const ALL: [Theme; 5] = [Theme::Matrix, Theme::Glacier, Theme::Ember, Theme::Violet, Theme::Crimson];

    /// Theme of a level (1-based; out-of-range levels clamp)
    pub fn for_level(level: u32) -> Self {
        let index = level.clamp(1, LEVEL_COUNT) as usize - 1;
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Matrix => "Matrix",
            Theme::Glacier => "Glacier",
            Theme::Ember => "Ember",
            Theme::Violet => "Violet",
            Theme::Crimson => "Crimson",
        }
    }

    /// CSS class a browser host applies to the frame element
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Matrix => "theme-matrix",
            Theme::Glacier => "theme-glacier",
            Theme::Ember => "theme-ember",
            Theme::Violet => "theme-violet",
            Theme::Crimson => "theme-crimson",
        }
    }

    /// Foreground colour (sRGB)
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Theme::Matrix => [0x00, 0xff, 0x41],
            Theme::Glacier => [0x7f, 0xdb, 0xff],
            Theme::Ember => [0xff, 0x9f, 0x1c],
            Theme::Violet => [0xc7, 0x7d, 0xff],
            Theme::Crimson => [0xff, 0x3b, 0x3b],
        }
    }
}

/// Whether `level` is the last one before wrapping
pub fn is_last_level(level: u32) -> bool {
    level >= LEVEL_COUNT
}

/// Phase of the current level
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LevelPhase {
    #[default]
    Playing,
    /// Goal reached; `frozen` is the pinned frame once one has been rendered
    Won { frozen: Option<Frame> },
}

impl LevelPhase {
    pub fn has_won(&self) -> bool {
        matches!(self, LevelPhase::Won { .. })
    }

    pub fn frozen_frame(&self) -> Option<&Frame> {
        match self {
            LevelPhase::Won { frozen } => frozen.as_ref(),
            LevelPhase::Playing => None,
        }
    }

    /// Pin `frame` as the victory frame; returns true only when it takes effect
    pub fn pin_frame(&mut self, frame: &Frame) -> bool {
        match self {
            LevelPhase::Won { frozen } if frozen.is_none() => {
                *frozen = Some(frame.clone());
                true
            }
            _ => false,
        }
    }
}

/// Build the state for the start of `level`
pub fn start_level(level: u32, run_seed: u64, records: RunRecords, settings: &Settings) -> GameState {
    let level = level.clamp(1, LEVEL_COUNT);
    let run_seed = run_seed & SEED_MASK;
    let maze = maze::generate(level, run_seed);
    let player = Player::spawn(&maze, settings.player_radius);
    log::info!(
        "Starting level {} ({} theme) at {:?}",
        level,
        Theme::for_level(level).name(),
        maze.start()
    );
    GameState {
        seed: run_seed,
        level,
        maze,
        player,
        phase: LevelPhase::Playing,
        level_time: 0.0,
        time_ticks: 0,
        records,
    }
}

/// Fresh game at level 1 with empty records
pub fn new_game(seed: u64, settings: &Settings) -> GameState {
    start_level(1, seed, RunRecords::new(), settings)
}

/// Discard all progress and start over at level 1
pub fn restart(seed: u64, settings: &Settings) -> GameState {
    log::info!("Restarting run with seed {}", seed & SEED_MASK);
    new_game(seed, settings)
}

/// Mark the level as won and record its time
pub(crate) fn complete_level(state: &mut GameState) {
    if state.phase.has_won() {
        return;
    }
    state.phase = LevelPhase::Won { frozen: None };
    let new_best = state.records.record_completion(state.level, state.level_time);
    log::info!(
        "Level {} complete in {:.2}s after {} ticks{}",
        state.level,
        state.level_time,
        state.time_ticks,
        if new_best { " (new best)" } else { "" }
    );
}

/// Advance past a won level
///
/// Returns the state unchanged when the level has not been won. After the
/// last level the run wraps to level 1 with a newly derived seed; best times
/// survive the wrap, run times do not.
pub fn next_level(state: GameState, settings: &Settings) -> GameState {
    if !state.has_won() {
        log::warn!("next_level ignored: level {} not won yet", state.level);
        return state;
    }

    let mut records = state.records;
    if is_last_level(state.level) {
        let seed = wrap_seed(state.seed);
        log::info!("All {} levels complete, wrapping with seed {}", LEVEL_COUNT, seed);
        records.start_new_run();
        start_level(1, seed, records, settings)
    } else {
        records.clear_flags();
        start_level(state.level + 1, state.seed, records, settings)
    }
}

/// Seed for the run after `seed`
pub fn wrap_seed(seed: u64) -> u64 {
    let mut rng = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    rng.random::<u64>() & SEED_MASK
}
