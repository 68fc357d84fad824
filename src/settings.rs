//! Engine settings and tuning
//!
//! Everything the host may tune without touching game logic: view, speeds,
//! collision radius and depth shading.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Depth shading presets (how many distance bands walls are split into)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DepthPreset {
    Coarse,
    #[default]
    Standard,
    Fine,
}

impl DepthPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepthPreset::Coarse => "Coarse",
            DepthPreset::Standard => "Standard",
            DepthPreset::Fine => "Fine",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coarse" | "low" => Some(DepthPreset::Coarse),
            "standard" | "medium" | "med" => Some(DepthPreset::Standard),
            "fine" | "high" => Some(DepthPreset::Fine),
            _ => None,
        }
    }

    /// Wall glyphs from nearest to farthest
    pub fn wall_glyphs(&self) -> &'static [char] {
        match self {
            DepthPreset::Coarse => &['█', '▒', '░'],
            DepthPreset::Standard => &['█', '▓', '▒', '░', '·'],
            DepthPreset::Fine => &['█', '▓', '▒', '░', ':', '·'],
        }
    }

    /// Upper distance edge of every band except the last (which is open-ended)
    pub fn band_edges(&self) -> &'static [f64] {
        match self {
            DepthPreset::Coarse => &[2.0, 5.0],
            DepthPreset::Standard => &[1.5, 3.0, 5.0, 8.0],
            DepthPreset::Fine => &[1.0, 2.0, 3.5, 5.5, 8.0],
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wall shading preset
    pub depth_preset: DepthPreset,

    // === View ===
    /// Horizontal field of view in degrees
    pub fov_degrees: f64,
    /// Walls beyond this distance all use the faintest glyph
    pub max_view_distance: f64,

    // === Movement ===
    /// Forward/strafe speed (cells per second)
    pub move_speed: f64,
    /// Keyboard turn speed (radians per second)
    pub turn_speed: f64,
    /// Radians of heading change per unit of mouse delta
    pub mouse_sensitivity: f64,
    /// Player collision radius (cells)
    pub player_radius: f64,
    /// Largest elapsed time a single tick integrates
    pub max_delta_time: f64,

    // === HUD ===
    /// Start banner and win overlay text
    pub show_banners: bool,
    /// Seconds of simulation time the start banner flashes for
    pub start_banner_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            depth_preset: DepthPreset::Standard,

            fov_degrees: 66.0,
            max_view_distance: 16.0,

            move_speed: 1.8,
            turn_speed: 3.0,
            mouse_sensitivity: 1.0,
            player_radius: 0.2,
            max_delta_time: 0.1,

            show_banners: true,
            start_banner_secs: 3.0,
        }
    }
}

impl Settings {
    /// Create settings from a depth preset (everything else default)
    pub fn from_preset(preset: DepthPreset) -> Self {
        Self {
            depth_preset: preset,
            ..Self::default()
        }
    }

    /// Field of view in radians
    pub fn fov(&self) -> f64 {
        self.fov_degrees.to_radians()
    }

    /// Copy with every out-of-range value pulled back into range
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut s = self.clone();

        s.fov_degrees = clamp_field("fov_degrees", s.fov_degrees, 30.0, 120.0, defaults.fov_degrees);
        s.max_view_distance =
            clamp_field("max_view_distance", s.max_view_distance, 1.0, 64.0, defaults.max_view_distance);
        s.move_speed = clamp_field("move_speed", s.move_speed, 0.0, 10.0, defaults.move_speed);
        s.turn_speed = clamp_field("turn_speed", s.turn_speed, 0.0, 20.0, defaults.turn_speed);
        s.mouse_sensitivity =
            clamp_field("mouse_sensitivity", s.mouse_sensitivity, 0.0, 10.0, defaults.mouse_sensitivity);
        s.player_radius = clamp_field("player_radius", s.player_radius, 0.05, 0.45, defaults.player_radius);
        s.max_delta_time = clamp_field("max_delta_time", s.max_delta_time, 0.001, 0.25, defaults.max_delta_time);
        s.start_banner_secs =
            clamp_field("start_banner_secs", s.start_banner_secs, 0.0, 30.0, defaults.start_banner_secs);
        s
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidSettings(e.to_string()))?;
        Ok(settings.sanitized())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(EngineError::Encode)
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn clamp_field(name: &str, value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("Setting {} is not finite, using {}", name, fallback);
        return fallback;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("Setting {} = {} out of range, clamped to {}", name, value, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_one_more_glyph_than_edges() {
        for preset in [DepthPreset::Coarse, DepthPreset::Standard, DepthPreset::Fine] {
            assert_eq!(preset.wall_glyphs().len(), preset.band_edges().len() + 1);
            assert!(preset.band_edges().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(DepthPreset::from_str("FINE"), Some(DepthPreset::Fine));
        assert_eq!(DepthPreset::from_str("med"), Some(DepthPreset::Standard));
        assert_eq!(DepthPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = Settings {
            fov_degrees: 500.0,
            player_radius: 0.9,
            move_speed: f64::NAN,
            ..Settings::default()
        };
        let s = settings.sanitized();
        assert_eq!(s.fov_degrees, 120.0);
        assert_eq!(s.player_radius, 0.45);
        assert_eq!(s.move_speed, Settings::default().move_speed);
    }

    #[test]
    fn test_from_json_partial() {
        let s = Settings::from_json(r#"{ "depth_preset": "Fine", "fov_degrees": 90.0 }"#).unwrap();
        assert_eq!(s.depth_preset, DepthPreset::Fine);
        assert_eq!(s.fov_degrees, 90.0);
        assert_eq!(s.move_speed, Settings::default().move_speed);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(EngineError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings::from_preset(DepthPreset::Coarse);
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(s, back);
    }
}
