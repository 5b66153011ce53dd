//! Signal graph topology.
//!
//! The pipeline is data: an ordered list of [`Stage`] descriptors checked by
//! [`GraphBuilder::build`]. A platform backend walks the stages in order and
//! connects one node per stage.

use serde::{Deserialize, Serialize};

use crate::config::{EqualizerConfig, PlayerConfig};
use crate::error::{PlayerError, Result};

const MIN_FFT_SIZE: u32 = 32;
const MAX_FFT_SIZE: u32 = 32768;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Bass,
    Mid,
    Treble,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Bass, Band::Mid, Band::Treble];

    pub fn label(self) -> &'static str {
        match self {
            Band::Bass => "Bass",
            Band::Mid => "Mid",
            Band::Treble => "Treble",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterShape {
    LowShelf,
    Peaking,
    HighShelf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    Source,
    Filter {
        band: Band,
        shape: FilterShape,
        frequency_hz: f32,
        gain_db: f32,
    },
    Gain {
        level: f32,
    },
    Analyser {
        fft_size: u32,
    },
    Destination,
}

#[derive(Debug, Default)]
pub struct GraphBuilder {
    stages: Vec<Stage>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self) -> Self {
        self.stages.push(Stage::Source);
        self
    }

    pub fn filter(mut self, band: Band, shape: FilterShape, frequency_hz: f32) -> Self {
        self.stages.push(Stage::Filter {
            band,
            shape,
            frequency_hz,
            gain_db: 0.0,
        });
        self
    }

    pub fn gain(mut self, level: f32) -> Self {
        self.stages.push(Stage::Gain { level });
        self
    }

    pub fn analyser(mut self, fft_size: u32) -> Self {
        self.stages.push(Stage::Analyser { fft_size });
        self
    }

    pub fn destination(mut self) -> Self {
        self.stages.push(Stage::Destination);
        self
    }

    /// Check the topology and freeze it.
    ///
    /// # Errors
    ///
    /// [`PlayerError::InvalidGraph`] unless the chain starts with the only
    /// source, ends with the only destination, has exactly one analyser and
    /// uses each band at most once. [`PlayerError::InvalidFftSize`] for a bad
    /// analyser window.
    pub fn build(self) -> Result<GraphTopology> {
        let stages = self.stages;

        if stages.first() != Some(&Stage::Source) {
            return Err(PlayerError::InvalidGraph("first stage must be the source".into()));
        }
        if stages.last() != Some(&Stage::Destination) {
            return Err(PlayerError::InvalidGraph("last stage must be the destination".into()));
        }

        let mut seen_bands = Vec::new();
        let mut analysers = 0;
        for (i, stage) in stages.iter().enumerate() {
            match stage {
                Stage::Source if i != 0 => {
                    return Err(PlayerError::InvalidGraph(format!("extra source at stage {i}")));
                }
                Stage::Destination if i != stages.len() - 1 => {
                    return Err(PlayerError::InvalidGraph(format!(
                        "extra destination at stage {i}"
                    )));
                }
                Stage::Filter { band, .. } => {
                    if seen_bands.contains(band) {
                        return Err(PlayerError::InvalidGraph(format!(
                            "{} band appears twice",
                            band.label()
                        )));
                    }
                    seen_bands.push(*band);
                }
                Stage::Analyser { fft_size } => {
                    if !fft_size.is_power_of_two()
                        || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(fft_size)
                    {
                        return Err(PlayerError::InvalidFftSize(*fft_size));
                    }
                    analysers += 1;
                }
                _ => {}
            }
        }
        if analysers != 1 {
            return Err(PlayerError::InvalidGraph(format!(
                "expected one analyser, found {analysers}"
            )));
        }

        Ok(GraphTopology { stages })
    }
}

/// A validated stage chain. Only [`GraphBuilder::build`] creates one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphTopology {
    stages: Vec<Stage>,
}

impl GraphTopology {
    /// Source → bass shelf → mid peak → treble shelf → gain → analyser →
    /// output.
    ///
    /// # Errors
    ///
    /// Fails only when the configured FFT size is invalid.
    pub fn equalizer(config: &PlayerConfig) -> Result<Self> {
        let EqualizerConfig {
            bass_hz,
            mid_hz,
            treble_hz,
            ..
        } = config.equalizer;
        GraphBuilder::new()
            .source()
            .filter(Band::Bass, FilterShape::LowShelf, bass_hz)
            .filter(Band::Mid, FilterShape::Peaking, mid_hz)
            .filter(Band::Treble, FilterShape::HighShelf, treble_hz)
            .gain(config.initial_volume.clamp(0.0, 1.0))
            .analyser(config.fft_size)
            .destination()
            .build()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn fft_size(&self) -> u32 {
        self.stages
            .iter()
            .find_map(|s| match s {
                Stage::Analyser { fft_size } => Some(*fft_size),
                _ => None,
            })
            .unwrap_or(MIN_FFT_SIZE)
    }

    /// Number of magnitude samples the analyser exposes.
    pub fn bin_count(&self) -> usize {
        self.fft_size() as usize / 2
    }

    pub fn bands(&self) -> impl Iterator<Item = Band> + '_ {
        self.stages.iter().filter_map(|s| match s {
            Stage::Filter { band, .. } => Some(*band),
            _ => None,
        })
    }
}

/// Anything that can hand out the analyser's magnitude buffer.
pub trait SpectrumSource {
    fn bin_count(&self) -> usize;

    /// Overwrite `out` with the latest magnitudes, one byte per bin.
    fn fill_frequency_data(&self, out: &mut [u8]);
}

/// Per-band gains in dB plus the output volume, kept within the
/// configured slider ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EqualizerSettings {
    pub bass_db: f32,
    pub mid_db: f32,
    pub treble_db: f32,
    pub volume: f32,
    min_db: f32,
    max_db: f32,
}

impl EqualizerSettings {
    pub fn new(config: &PlayerConfig) -> Self {
        let (min_db, max_db) = ordered(config.equalizer.min_gain_db, config.equalizer.max_gain_db);
        Self {
            bass_db: 0.0,
            mid_db: 0.0,
            treble_db: 0.0,
            volume: config.initial_volume.clamp(0.0, 1.0),
            min_db,
            max_db,
        }
    }

    pub fn gain_range(&self) -> std::ops::RangeInclusive<f32> {
        self.min_db..=self.max_db
    }

    pub fn band(&self, band: Band) -> f32 {
        match band {
            Band::Bass => self.bass_db,
            Band::Mid => self.mid_db,
            Band::Treble => self.treble_db,
        }
    }

    /// Store the clamped gain and return what was stored.
    pub fn set_band(&mut self, band: Band, gain_db: f32) -> f32 {
        let gain_db = if gain_db.is_finite() {
            gain_db.clamp(self.min_db, self.max_db)
        } else {
            0.0
        };
        match band {
            Band::Bass => self.bass_db = gain_db,
            Band::Mid => self.mid_db = gain_db,
            Band::Treble => self.treble_db = gain_db,
        }
        gain_db
    }

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 0.0 };
        self.volume
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_equalizer_chain_order() {
        let graph = GraphTopology::equalizer(&PlayerConfig::default()).unwrap();
        let stages = graph.stages();
        assert_eq!(stages.len(), 7);
        assert_eq!(stages[0], Stage::Source);
        let filters: Vec<_> = stages[1..4]
            .iter()
            .map(|s| match s {
                Stage::Filter {
                    band,
                    shape,
                    frequency_hz,
                    ..
                } => (*band, *shape, *frequency_hz),
                other => panic!("expected a filter, got {other:?}"),
            })
            .collect();
        assert_eq!(
            filters,
            [
                (Band::Bass, FilterShape::LowShelf, 500.0),
                (Band::Mid, FilterShape::Peaking, 1500.0),
                (Band::Treble, FilterShape::HighShelf, 3000.0),
            ]
        );
        assert_eq!(stages[4], Stage::Gain { level: 1.0 });
        assert_eq!(stages[5], Stage::Analyser { fft_size: 256 });
        assert_eq!(stages[6], Stage::Destination);
        assert_eq!(graph.bin_count(), 128);
        assert_eq!(graph.bands().collect::<Vec<_>>(), Band::ALL);
    }

    #[test]
    fn equalizer_builds_for_any_valid_window() {
        for fft_size in [32, 256, 2048, 32768] {
            let config = PlayerConfig {
                fft_size,
                ..PlayerConfig::default()
            };
            let graph = GraphTopology::equalizer(&config).unwrap();
            assert_eq!(graph.stages().last(), Some(&Stage::Destination));
            assert_eq!(graph.bin_count(), fft_size as usize / 2);
        }

        let config = PlayerConfig {
            fft_size: 300,
            ..PlayerConfig::default()
        };
        assert!(matches!(
            GraphTopology::equalizer(&config),
            Err(PlayerError::InvalidFftSize(300))
        ));
    }

    #[test]
    fn rejects_missing_source_or_destination() {
        let err = GraphBuilder::new().analyser(256).destination().build().unwrap_err();
        assert!(matches!(err, PlayerError::InvalidGraph(_)));

        let err = GraphBuilder::new().source().analyser(256).build().unwrap_err();
        assert!(matches!(err, PlayerError::InvalidGraph(_)));
    }

    #[test]
    fn rejects_duplicate_band_and_analyser_count() {
        let err = GraphBuilder::new()
            .source()
            .filter(Band::Bass, FilterShape::LowShelf, 100.0)
            .filter(Band::Bass, FilterShape::LowShelf, 200.0)
            .analyser(256)
            .destination()
            .build()
            .unwrap_err();
        assert!(matches!(err, PlayerError::InvalidGraph(_)));

        let err = GraphBuilder::new().source().destination().build().unwrap_err();
        assert!(matches!(err, PlayerError::InvalidGraph(_)));
    }

    #[test]
    fn rejects_bad_fft_size() {
        for size in [0, 100, 16, 65536] {
            let err = GraphBuilder::new()
                .source()
                .analyser(size)
                .destination()
                .build()
                .unwrap_err();
            assert!(matches!(err, PlayerError::InvalidFftSize(s) if s == size));
        }
    }

    #[test]
    fn equalizer_settings_clamp() {
        let mut eq = EqualizerSettings::new(&PlayerConfig::default());
        assert_eq!(eq.set_band(Band::Bass, 30.0), 12.0);
        assert_eq!(eq.set_band(Band::Treble, -3.5), -3.5);
        assert_eq!(eq.band(Band::Bass), 12.0);
        assert_eq!(eq.band(Band::Mid), 0.0);
        assert_eq!(eq.set_volume(1.7), 1.0);
        assert_eq!(eq.set_volume(f32::NAN), 0.0);
    }
}
