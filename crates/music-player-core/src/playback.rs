//! Playback state machine.
//!
//! Transitions never touch media directly. Each one returns the
//! [`Command`]s the platform has to run, in order, so the machine can be
//! driven and inspected without a browser.

use log::debug;
use rand::Rng;

use crate::error::{PlayerError, Result};
use crate::event::Command;
use crate::playlist::Playlist;
use crate::track::TrackKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Paused,
    Playing,
}

/// Which surface currently holds the selected track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    None,
    Audio,
    Video,
}

#[derive(Clone, Debug)]
pub struct PlaybackMachine {
    current: Option<usize>,
    status: PlaybackStatus,
    presentation: Presentation,
    autoplay: bool,
    shuffle: bool,
}

impl Default for PlaybackMachine {
    fn default() -> Self {
        Self {
            current: None,
            status: PlaybackStatus::Idle,
            presentation: Presentation::None,
            autoplay: false,
            shuffle: false,
        }
    }
}

impl PlaybackMachine {
    pub fn new(autoplay: bool, shuffle: bool) -> Self {
        Self {
            autoplay,
            shuffle,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.autoplay = on;
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
    }

    /// Load and start the track at `index`, taking the popup path for video.
    ///
    /// # Errors
    ///
    /// [`PlayerError::IndexOutOfRange`] when `index` is not a valid slot.
    /// Nothing changes in that case.
    pub fn select_track(&mut self, playlist: &Playlist, index: usize) -> Result<Vec<Command>> {
        let track = playlist.get(index).ok_or(PlayerError::IndexOutOfRange {
            index,
            len: playlist.len(),
        })?;

        let mut commands = Vec::new();
        match track.kind {
            TrackKind::Video => {
                if self.presentation == Presentation::Audio {
                    commands.push(Command::PauseAudio);
                    commands.push(Command::UnloadAudio);
                }
                commands.push(Command::ShowVideo(track.locator.clone()));
                self.presentation = Presentation::Video;
            }
            TrackKind::Audio => {
                if self.presentation == Presentation::Video {
                    commands.push(Command::CloseVideo);
                    commands.push(Command::ExitFullscreen);
                }
                commands.push(Command::LoadAudio(track.locator.clone()));
                commands.push(Command::PlayAudio);
                self.presentation = Presentation::Audio;
            }
        }

        debug!("select track {index} ({:?}): {}", track.kind, track.display_name);
        self.current = Some(index);
        self.status = PlaybackStatus::Playing;
        Ok(commands)
    }

    pub fn toggle_play_pause(&mut self, playlist: &Playlist) -> Vec<Command> {
        if playlist.is_empty() {
            return Vec::new();
        }

        match (self.presentation, self.status) {
            (Presentation::None, _) | (_, PlaybackStatus::Idle) => {
                self.select_track(playlist, 0).unwrap_or_default()
            }
            (Presentation::Audio, PlaybackStatus::Playing) => {
                self.status = PlaybackStatus::Paused;
                vec![Command::PauseAudio]
            }
            (Presentation::Audio, PlaybackStatus::Paused) => {
                self.status = PlaybackStatus::Playing;
                vec![Command::PlayAudio]
            }
            (Presentation::Video, PlaybackStatus::Playing) => {
                self.status = PlaybackStatus::Paused;
                vec![Command::PauseVideo]
            }
            (Presentation::Video, PlaybackStatus::Paused) => {
                self.status = PlaybackStatus::Playing;
                vec![Command::ResumeVideo]
            }
        }
    }

    pub fn next(&mut self, playlist: &Playlist) -> Vec<Command> {
        let len = playlist.len();
        if len == 0 {
            return Vec::new();
        }
        let target = self.current.map_or(0, |i| (i + 1) % len);
        self.advance_to(playlist, target)
    }

    pub fn previous(&mut self, playlist: &Playlist) -> Vec<Command> {
        let len = playlist.len();
        if len == 0 {
            return Vec::new();
        }
        let target = self.current.map_or(len - 1, |i| (i + len - 1) % len);
        self.advance_to(playlist, target)
    }

    fn advance_to(&mut self, playlist: &Playlist, target: usize) -> Vec<Command> {
        let mut commands = self.pause_current();
        commands.extend(self.select_track(playlist, target).unwrap_or_default());
        commands
    }

    fn pause_current(&self) -> Vec<Command> {
        match self.presentation {
            Presentation::Audio => vec![Command::PauseAudio],
            Presentation::Video => vec![Command::PauseVideo],
            Presentation::None => Vec::new(),
        }
    }

    /// Natural end of the current media. Self-repeat is allowed in shuffle.
    pub fn track_ended<R: Rng>(&mut self, playlist: &Playlist, rng: &mut R) -> Vec<Command> {
        let len = playlist.len();
        if len == 0 {
            return Vec::new();
        }

        if !self.autoplay {
            if self.status == PlaybackStatus::Playing {
                self.status = PlaybackStatus::Paused;
            }
            return Vec::new();
        }

        let target = if self.shuffle {
            rng.random_range(0..len)
        } else {
            self.current.map_or(0, |i| (i + 1) % len)
        };
        debug!("track ended, autoplay advancing to {target}");
        self.select_track(playlist, target).unwrap_or_default()
    }

    pub fn playback_rejected(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Adopt a play/pause made directly on the video element. Stale
    /// notifications from a popup that is no longer presented are ignored.
    pub fn video_state_changed(&mut self, playing: bool) {
        if self.presentation != Presentation::Video || self.status == PlaybackStatus::Idle {
            return;
        }
        self.status = if playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        };
    }

    /// Keep `current` valid after `playlist` lost the entry at `removed`.
    /// Removing the playing track stops everything.
    pub fn track_removed(&mut self, removed: usize, remaining: usize) -> Vec<Command> {
        match self.current {
            Some(current) if current == removed || remaining == 0 => self.stop(),
            Some(current) if current > removed => {
                self.current = Some(current - 1);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Stop and unload whatever is presented and return to idle.
    pub fn stop(&mut self) -> Vec<Command> {
        let commands = match self.presentation {
            Presentation::Audio => vec![Command::PauseAudio, Command::UnloadAudio],
            Presentation::Video => vec![Command::CloseVideo, Command::ExitFullscreen],
            Presentation::None => Vec::new(),
        };
        self.current = None;
        self.status = PlaybackStatus::Idle;
        self.presentation = Presentation::None;
        commands
    }
}
