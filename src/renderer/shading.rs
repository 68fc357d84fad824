//! Glyph selection by distance

use super::raycast::Side;
use crate::settings::{DepthPreset, Settings};

/// Ceiling glyph
pub const CEILING_GLYPH: char = ' ';
/// Marks floor inside the goal cell
pub const GOAL_GLYPH: char = '*';

/// Floor glyphs, nearest first, with the share of the view distance each covers
const FLOOR_BANDS: [(f64, char); 2] = [(0.3, '.'), (0.6, ',')];

/// Maps distances to glyphs for one depth preset
#[derive(Debug, Clone, Copy)]
pub struct Shader {
    glyphs: &'static [char],
    edges: &'static [f64],
    max_distance: f64,
}

impl Shader {
    pub fn new(preset: DepthPreset, max_distance: f64) -> Self {
        Self {
            glyphs: preset.wall_glyphs(),
            edges: preset.band_edges(),
            max_distance,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.depth_preset, settings.max_view_distance)
    }

    /// Band index of a wall distance (0 = nearest)
    pub fn wall_band(&self, distance: f64) -> usize {
        let last = self.glyphs.len() - 1;
        if distance.is_nan() || distance >= self.max_distance {
            return last;
        }
        self.edges.iter().position(|&edge| distance < edge).unwrap_or(last)
    }

    /// Wall glyph; faces of constant Y render one band lighter
    pub fn wall_glyph(&self, distance: f64, side: Side) -> char {
        let last = self.glyphs.len() - 1;
        let band = match side {
            Side::Vertical => self.wall_band(distance),
            Side::Horizontal => (self.wall_band(distance) + 1).min(last),
        };
        self.glyphs[band]
    }

    /// Floor glyph for a floor point `distance` away
    pub fn floor_glyph(&self, distance: f64) -> char {
        FLOOR_BANDS
            .iter()
            .find(|(share, _)| distance < share * self.max_distance)
            .map(|&(_, glyph)| glyph)
            .unwrap_or(' ')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_bands_darken_with_distance() {
        let shader = Shader::new(DepthPreset::Standard, 16.0);
        assert_eq!(shader.wall_glyph(0.5, Side::Vertical), '█');
        assert_eq!(shader.wall_glyph(2.0, Side::Vertical), '▓');
        assert_eq!(shader.wall_glyph(4.0, Side::Vertical), '▒');
        assert_eq!(shader.wall_glyph(6.0, Side::Vertical), '░');
        assert_eq!(shader.wall_glyph(10.0, Side::Vertical), '·');
        assert_eq!(shader.wall_glyph(100.0, Side::Vertical), '·');
        assert_eq!(shader.wall_glyph(f64::NAN, Side::Vertical), '·');
    }

    #[test]
    fn test_band_is_monotonic() {
        for preset in [DepthPreset::Coarse, DepthPreset::Standard, DepthPreset::Fine] {
            let shader = Shader::new(preset, 16.0);
            let mut last = 0;
            for i in 0..400 {
                let band = shader.wall_band(i as f64 * 0.05);
                assert!(band >= last);
                last = band;
            }
        }
    }

    #[test]
    fn test_horizontal_faces_are_lighter() {
        let shader = Shader::new(DepthPreset::Standard, 16.0);
        assert_eq!(shader.wall_glyph(0.5, Side::Horizontal), '▓');
        assert_eq!(shader.wall_glyph(10.0, Side::Horizontal), '·');
    }

    #[test]
    fn test_floor_glyphs() {
        let shader = Shader::new(DepthPreset::Standard, 10.0);
        assert_eq!(shader.floor_glyph(1.0), '.');
        assert_eq!(shader.floor_glyph(4.0), ',');
        assert_eq!(shader.floor_glyph(7.0), ' ');
    }
}
