//! Platform-independent core of the music player.
//!
//! - `graph`: signal graph topology (source, three-band equalizer, gain,
//!   analyser, output) and the [`SpectrumSource`] seam
//! - `playback`: play/pause/next/previous/autoplay/shuffle state machine
//! - `playlist`: ordered track store
//! - `progress`: elapsed/total time and seek mapping
//! - `visualizer`: per-frame spectrum bar layout
//! - `session`: [`PlayerSession`], the context that owns all of the above and
//!   forwards [`Command`]s to a [`MediaBackend`]

mod config;
mod display;
mod error;
mod event;
mod graph;
mod playback;
mod playlist;
mod progress;
mod session;
mod track;
mod visualizer;

pub use config::{EqualizerConfig, PlayerConfig, VisualizerConfig};
pub use display::{DisplayState, NO_TRACK_LABEL};
pub use error::{PlayerError, Result};
pub use event::{Command, MediaBackend, PlayerEvent};
pub use graph::{
    Band, EqualizerSettings, FilterShape, GraphBuilder, GraphTopology, SpectrumSource, Stage,
};
pub use playback::{PlaybackMachine, PlaybackStatus, Presentation};
pub use playlist::Playlist;
pub use progress::{format_time, Progress};
pub use session::PlayerSession;
pub use track::{Locator, Track, TrackKind};
pub use visualizer::{Bar, Surface, Visualizer};
