//! First-person view composition
//!
//! One ray per column. Each column is split into ceiling, wall slice and
//! floor; the wall slice is `height / distance` rows tall (capped at twice the
//! frame height) and centred on the horizon.

use super::frame::{Frame, Viewport};
use super::overlay;
use super::raycast::cast_ray;
use super::shading::{CEILING_GLYPH, GOAL_GLYPH, Shader};
use crate::settings::Settings;
use crate::sim::GameState;

/// Nearest distance a wall slice is drawn for
const MIN_WALL_DISTANCE: f64 = 1.0e-3;

/// Angle of column `col` relative to the view direction
pub fn column_offset(col: usize, width: usize, fov: f64) -> f64 {
    if width <= 1 {
        return 0.0;
    }
    -fov / 2.0 + fov * col as f64 / (width - 1) as f64
}

/// Perpendicular distance of the floor seen through row `row` (lower half only)
pub fn floor_distance(row: usize, height: usize) -> f64 {
    let half = height as f64 / 2.0;
    let below = (row as f64 + 0.5 - half) / half;
    1.0 / below.max(0.1 / half.max(1.0))
}

/// Render the view for `state` without any state transition
pub fn render(state: &GameState, viewport: Viewport, settings: &Settings) -> Frame {
    let mut frame = Frame::new(viewport);
    let (width, height) = (viewport.width(), viewport.height());
    let h = height as f64;
    let fov = settings.fov();
    let shader = Shader::from_settings(settings);

    for col in 0..width {
        let offset = column_offset(col, width, fov);
        let hit = cast_ray(&state.maze, state.player.pos, state.player.heading + offset);
        // Perpendicular distance removes fisheye distortion
        let cos = offset.cos();
        let distance = (hit.distance * cos).max(MIN_WALL_DISTANCE);
        let goal_span = hit.goal_span.map(|(enter, exit)| (enter * cos, exit * cos));

        let wall_height = (h / distance).min(2.0 * h);
        let top = (h - wall_height) / 2.0;
        let bottom = top + wall_height;
        let wall = shader.wall_glyph(distance, hit.side);

        for row in 0..height {
            let center = row as f64 + 0.5;
            let glyph = if center < top {
                CEILING_GLYPH
            } else if center < bottom {
                wall
            } else {
                let floor = floor_distance(row, height);
                match goal_span {
                    Some((enter, exit)) if floor >= enter && floor < exit => GOAL_GLYPH,
                    _ => shader.floor_glyph(floor),
                }
            };
            frame.set(col, row, glyph);
        }
    }

    if settings.show_banners {
        if state.has_won() {
            overlay::stamp_victory(&mut frame, state);
        } else if overlay::start_banner_visible(state.level_time, settings.start_banner_secs) {
            overlay::stamp_start_banner(&mut frame, state.level);
        }
    }
    frame
}
