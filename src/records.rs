//! Level completion times and in-session best times
//!
//! Times are simulation seconds (sum of tick deltas), so a replay of the same
//! inputs always produces the same records. Nothing here touches the disk.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::error::{EngineError, EngineResult};

/// Times for the current run plus the best seen this session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunRecords {
    /// Completion time of each level in this run (one slot per level)
    pub run_times: Vec<Option<f64>>,
    /// Best completion time of each level (one slot per level)
    pub best_times: Vec<Option<f64>>,
    /// Sum of this run's completion times
    pub total_time: f64,
    /// Best full-run total
    pub best_total_time: Option<f64>,
    /// Level whose best time was just beaten (cleared on the next level)
    pub new_record_level: Option<u32>,
    /// The full-run total was just beaten
    pub new_record_total: bool,
}

impl Default for RunRecords {
    fn default() -> Self {
        Self::new()
    }
}

impl RunRecords {
    pub fn new() -> Self {
        Self {
            run_times: vec![None; LEVEL_COUNT as usize],
            best_times: vec![None; LEVEL_COUNT as usize],
            total_time: 0.0,
            best_total_time: None,
            new_record_level: None,
            new_record_total: false,
        }
    }

    fn slot(level: u32) -> Option<usize> {
        (1..=LEVEL_COUNT).contains(&level).then(|| (level - 1) as usize)
    }

    /// Completion time of `level` in this run
    pub fn run_time(&self, level: u32) -> Option<f64> {
        Self::slot(level).and_then(|i| self.run_times[i])
    }

    /// Best completion time of `level`
    pub fn best_time(&self, level: u32) -> Option<f64> {
        Self::slot(level).and_then(|i| self.best_times[i])
    }

    /// Check if a time would beat the best for `level`
    pub fn qualifies(&self, level: u32, time: f64) -> bool {
        match self.best_time(level) {
            Some(best) => time < best,
            None => Self::slot(level).is_some(),
        }
    }

    /// Record a level completion; returns true if it set a new best
    pub fn record_completion(&mut self, level: u32, time: f64) -> bool {
        let Some(slot) = Self::slot(level) else {
            return false;
        };

        let new_best = self.qualifies(level, time);
        if new_best {
            self.best_times[slot] = Some(time);
            self.new_record_level = Some(level);
        }
        self.run_times[slot] = Some(time);
        self.total_time += time;

        if level == LEVEL_COUNT {
            let total = self.total_time;
            if self.best_total_time.is_none_or(|best| total < best) {
                self.best_total_time = Some(total);
                self.new_record_total = true;
            }
        }
        new_best
    }

    /// Reset the "just beaten" markers (on entering a new level)
    pub fn clear_flags(&mut self) {
        self.new_record_level = None;
        self.new_record_total = false;
    }

    /// Forget this run's times but keep the bests (on wrapping to level 1)
    pub fn start_new_run(&mut self) {
        self.run_times = vec![None; LEVEL_COUNT as usize];
        self.total_time = 0.0;
        self.clear_flags();
    }

    /// Check structural consistency after deserialization
    pub fn validate(&self) -> EngineResult<()> {
        let slots = LEVEL_COUNT as usize;
        if self.run_times.len() != slots || self.best_times.len() != slots {
            return Err(EngineError::invalid_state(format!(
                "records must hold {} level slots",
                slots
            )));
        }
        let valid = |t: f64| t.is_finite() && t >= 0.0;
        let all_times = self
            .run_times
            .iter()
            .chain(self.best_times.iter())
            .flatten()
            .chain(self.best_total_time.iter())
            .copied()
            .chain(std::iter::once(self.total_time));
        for t in all_times {
            if !valid(t) {
                return Err(EngineError::invalid_state(format!("record time {} is not a valid duration", t)));
            }
        }
        if let Some(level) = self.new_record_level {
            if Self::slot(level).is_none() {
                return Err(EngineError::invalid_state(format!("record level {} out of range", level)));
            }
        }
        Ok(())
    }
}

/// Format a duration as `MM:SS.cc`, or `--:--` when absent
pub fn format_time(time: Option<f64>) -> String {
    match time {
        Some(t) => {
            let whole = t as u64;
            let centis = ((t % 1.0) * 100.0) as u64;
            format!("{:02}:{:02}.{:02}", whole / 60, whole % 60, centis)
        }
        None => "--:--".to_string(),
    }
}
