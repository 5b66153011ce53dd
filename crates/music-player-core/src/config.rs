//! Player configuration.
//!
//! Every section deserializes with defaults, so a host page only needs to
//! spell out the values it wants to change:
//!
//! ```
//! use music_player_core::PlayerConfig;
//!
//! let cfg = PlayerConfig::from_json_str(r#"{ "fft_size": 512 }"#).unwrap();
//! assert_eq!(cfg.fft_size, 512);
//! assert_eq!(cfg.equalizer.bass_hz, 500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Analyser transform window; the spectrum has half as many bins.
    pub fft_size: u32,
    /// Linear level of the gain stage at startup.
    pub initial_volume: f32,
    pub autoplay: bool,
    pub shuffle: bool,
    pub equalizer: EqualizerConfig,
    pub visualizer: VisualizerConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fft_size: 256,
            initial_volume: 1.0,
            autoplay: false,
            shuffle: false,
            equalizer: EqualizerConfig::default(),
            visualizer: VisualizerConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse a JSON config block. Missing fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlayerError::Config`] when the text is not valid JSON
    /// or a field has the wrong type.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Corner/center frequencies of the three bands and the slider range.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EqualizerConfig {
    pub bass_hz: f32,
    pub mid_hz: f32,
    pub treble_hz: f32,
    pub min_gain_db: f32,
    pub max_gain_db: f32,
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            bass_hz: 500.0,
            mid_hz: 1500.0,
            treble_hz: 3000.0,
            min_gain_db: -12.0,
            max_gain_db: 12.0,
        }
    }
}

/// Bar chart styling.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Multiplier on `surface_width / bin_count`. Values above 1 push the
    /// upper bins off the right edge.
    pub bar_width_factor: f32,
    pub bar_spacing: f32,
    pub height_scale: f32,
    pub bar_color: [u8; 3],
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            bar_width_factor: 2.5,
            bar_spacing: 1.0,
            height_scale: 0.5,
            bar_color: [173, 216, 230],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = PlayerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.fft_size, 256);
        assert_eq!(cfg.initial_volume, 1.0);
        assert!(!cfg.autoplay);
        assert_eq!(cfg.visualizer.bar_color, [173, 216, 230]);
    }

    #[test]
    fn nested_sections_merge_with_defaults() {
        let cfg = PlayerConfig::from_json_str(
            r#"{ "equalizer": { "mid_hz": 1000.0 }, "visualizer": { "height_scale": 1.0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.equalizer.mid_hz, 1000.0);
        assert_eq!(cfg.equalizer.treble_hz, 3000.0);
        assert_eq!(cfg.visualizer.height_scale, 1.0);
        assert_eq!(cfg.visualizer.bar_spacing, 1.0);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PlayerConfig::from_json_str("{ fft_size: }").unwrap_err();
        assert!(matches!(err, crate::PlayerError::Config(_)));
    }
}
