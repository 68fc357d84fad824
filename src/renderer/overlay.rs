//! Text stamped over the 3D view: the level start banner and the win screens

use super::frame::Frame;
use crate::consts::{BANNER_FLASH_CYCLE, BANNER_FLASH_DUTY, LEVEL_COUNT};
use crate::records::format_time;
use crate::sim::GameState;
use crate::sim::level::is_last_level;

const PERSONAL_BEST: &str = "  PERSONAL BEST!";

/// Whether the flashing start banner is lit at `level_time`
pub fn start_banner_visible(level_time: f64, duration: f64) -> bool {
    if level_time >= duration {
        return false;
    }
    let phase = level_time.rem_euclid(BANNER_FLASH_CYCLE) / BANNER_FLASH_CYCLE;
    phase < BANNER_FLASH_DUTY
}

pub fn start_banner_text(level: u32) -> String {
    format!("LEVEL {} - FIND THE EXIT!", level)
}

/// Stamp the start banner on the middle row
pub fn stamp_start_banner(frame: &mut Frame, level: u32) {
    let row = frame.height() / 2;
    frame.put_centered(row, &format!(" {} ", start_banner_text(level)));
}

/// Lines of the win overlay for a won state
pub fn victory_lines(state: &GameState) -> Vec<String> {
    let records = &state.records;
    let level = state.level;
    let time = records.run_time(level);
    let best_marker = |hit: bool| if hit { PERSONAL_BEST } else { "" };

    let mut lines = Vec::new();
    if is_last_level(level) {
        lines.push("ALL LEVELS COMPLETE!".to_string());
    } else {
        lines.push(format!("LEVEL {} COMPLETE!", level));
    }
    lines.push(String::new());
    lines.push(format!(
        "Time: {}{}",
        format_time(time),
        best_marker(records.new_record_level == Some(level))
    ));
    lines.push(format!("Best: {}", format_time(records.best_time(level))));

    if is_last_level(level) {
        lines.push(String::new());
        for l in 1..=LEVEL_COUNT {
            lines.push(format!("Level {}: {}", l, format_time(records.run_time(l))));
        }
        lines.push(format!(
            "Total: {}{}",
            format_time(Some(records.total_time)),
            best_marker(records.new_record_total)
        ));
        lines.push(format!("Best total: {}", format_time(records.best_total_time)));
        lines.push(String::new());
        lines.push("Press SPACE to play again".to_string());
    } else {
        lines.push(String::new());
        lines.push("Press SPACE to continue".to_string());
    }
    lines
}

/// Stamp the win overlay, vertically centred; blank lines leave the view visible
pub fn stamp_victory(frame: &mut Frame, state: &GameState) {
    let lines = victory_lines(state);
    let top = frame.height().saturating_sub(lines.len()) / 2;
    for (i, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            frame.put_centered(top + i, &format!(" {} ", line));
        }
    }
}
