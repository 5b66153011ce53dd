//! The player session: one explicit context owning the playlist, the
//! playback machine, progress and equalizer state, plus the platform
//! backend that carries out commands.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::PlayerConfig;
use crate::display::DisplayState;
use crate::error::Result;
use crate::event::{Command, MediaBackend, PlayerEvent};
use crate::graph::{Band, EqualizerSettings};
use crate::playback::{PlaybackMachine, Presentation};
use crate::playlist::Playlist;
use crate::progress::Progress;
use crate::track::Track;

pub struct PlayerSession<B: MediaBackend> {
    backend: B,
    playlist: Playlist,
    machine: PlaybackMachine,
    progress: Progress,
    equalizer: EqualizerSettings,
    rng: StdRng,
}

impl<B: MediaBackend> PlayerSession<B> {
    pub fn new(backend: B, config: &PlayerConfig) -> Self {
        Self::with_rng(backend, config, StdRng::from_os_rng())
    }

    /// Same as [`PlayerSession::new`] with a caller-supplied shuffle source.
    pub fn with_rng(backend: B, config: &PlayerConfig, rng: StdRng) -> Self {
        Self {
            backend,
            playlist: Playlist::new(),
            machine: PlaybackMachine::new(config.autoplay, config.shuffle),
            progress: Progress::default(),
            equalizer: EqualizerSettings::new(config),
            rng,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn playback(&self) -> &PlaybackMachine {
        &self.machine
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn equalizer(&self) -> &EqualizerSettings {
        &self.equalizer
    }

    pub fn current_index(&self) -> Option<usize> {
        self.machine.current()
    }

    pub fn display(&self) -> DisplayState {
        DisplayState::derive(&self.machine, &self.playlist, &self.progress)
    }

    // ----- playlist store -----

    pub fn add_track(&mut self, track: Track) -> usize {
        info!("added {:?} track {}", track.kind, track.display_name);
        self.playlist.append(track)
    }

    pub fn add_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) {
        for track in tracks {
            self.add_track(track);
        }
    }

    /// Remove one entry and release its locator. Playback stops if it was
    /// the current track.
    ///
    /// # Errors
    ///
    /// [`crate::PlayerError::IndexOutOfRange`] for an invalid slot; nothing
    /// changes.
    pub fn remove_at(&mut self, index: usize) -> Result<Track> {
        let removed = self.playlist.remove_at(index)?;
        let commands = self.machine.track_removed(index, self.playlist.len());
        if self.machine.current().is_none() {
            self.progress.reset();
        }
        self.run(commands);
        self.backend.execute(Command::ReleaseLocator(removed.locator.clone()));
        debug!("removed track {index}, {} left", self.playlist.len());
        Ok(removed)
    }

    /// Empty the playlist, stop playback and zero the display.
    pub fn clear(&mut self) {
        let commands = self.machine.stop();
        self.run(commands);
        for track in self.playlist.clear() {
            self.backend.execute(Command::ReleaseLocator(track.locator));
        }
        self.progress.reset();
        info!("playlist cleared");
    }

    // ----- playback -----

    /// # Errors
    ///
    /// [`crate::PlayerError::IndexOutOfRange`] for an invalid slot; playback
    /// carries on unchanged.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        let commands = self.machine.select_track(&self.playlist, index)?;
        self.progress.reset();
        self.run_user(commands);
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        let before = self.machine.current();
        let commands = self.machine.toggle_play_pause(&self.playlist);
        if self.machine.current() != before {
            self.progress.reset();
        }
        self.run_user(commands);
    }

    pub fn next(&mut self) {
        let commands = self.machine.next(&self.playlist);
        if !commands.is_empty() {
            self.progress.reset();
        }
        self.run_user(commands);
    }

    pub fn previous(&mut self) {
        let commands = self.machine.previous(&self.playlist);
        if !commands.is_empty() {
            self.progress.reset();
        }
        self.run_user(commands);
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.machine.set_autoplay(on);
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.machine.set_shuffle(on);
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        let on = !self.machine.autoplay();
        self.machine.set_autoplay(on);
        on
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        let on = !self.machine.shuffle();
        self.machine.set_shuffle(on);
        on
    }

    /// Seek the audio element to `percent` of the track. Does nothing until
    /// the duration is known or while the video popup has the track.
    pub fn seek(&mut self, percent: f64) {
        if self.machine.presentation() != Presentation::Audio {
            return;
        }
        if let Some(target) = self.progress.seek_target(percent) {
            self.progress.update(target, self.progress.duration().unwrap_or(f64::NAN));
            self.backend.execute(Command::SeekAudio(target));
        }
    }

    // ----- signal graph controls -----

    pub fn set_band_gain(&mut self, band: Band, gain_db: f32) {
        let gain_db = self.equalizer.set_band(band, gain_db);
        self.backend.execute(Command::SetFilterGain { band, gain_db });
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = self.equalizer.set_volume(volume);
        self.backend.execute(Command::SetVolume(volume));
    }

    // ----- platform events -----

    pub fn dispatch(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::TrackEnded => {
                let before = self.machine.current();
                let commands = self.machine.track_ended(&self.playlist, &mut self.rng);
                if !commands.is_empty() {
                    debug!("autoplay {before:?} -> {:?}", self.machine.current());
                    self.progress.reset();
                }
                self.run(commands);
            }
            PlayerEvent::PositionChanged { current_time, duration } => {
                self.progress.update(current_time, duration);
            }
            PlayerEvent::MetadataLoaded { duration } => {
                self.progress.set_duration(duration);
            }
            PlayerEvent::PlaybackRejected => {
                warn!("platform refused playback, waiting for the next play action");
                self.machine.playback_rejected();
            }
            PlayerEvent::VideoStateChanged { playing } => {
                self.machine.video_state_changed(playing);
            }
        }
    }

    fn run(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.backend.execute(command);
        }
    }

    /// Commands triggered by a user gesture. A suspended audio context gets
    /// resumed first so the browser's autoplay policy is satisfied.
    fn run_user(&mut self, commands: Vec<Command>) {
        if commands.iter().any(Command::starts_playback) && self.backend.context_suspended() {
            self.backend.execute(Command::ResumeContext);
        }
        self.run(commands);
    }
}
