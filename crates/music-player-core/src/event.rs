use crate::graph::Band;
use crate::track::Locator;

/// Notifications coming back from the platform's media elements.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    /// The audio element or the video popup reached the end naturally.
    TrackEnded,
    /// `timeupdate`. `duration` is passed through raw and may be `NaN`.
    PositionChanged { current_time: f64, duration: f64 },
    /// `loadedmetadata`.
    MetadataLoaded { duration: f64 },
    /// The platform refused to start playback, typically because no user
    /// gesture has unlocked audio yet.
    PlaybackRejected,
    /// The video element was paused or resumed by its own controls.
    VideoStateChanged { playing: bool },
}

/// Side effects the core asks the platform to perform, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    LoadAudio(Locator),
    PlayAudio,
    PauseAudio,
    /// Stop and drop the audio element's source entirely.
    UnloadAudio,
    SeekAudio(f64),
    /// Open the popup on this video and request fullscreen for it.
    ShowVideo(Locator),
    PauseVideo,
    ResumeVideo,
    CloseVideo,
    ExitFullscreen,
    /// Resume a suspended audio context before anything is played.
    ResumeContext,
    SetFilterGain { band: Band, gain_db: f32 },
    SetVolume(f32),
    ReleaseLocator(Locator),
}

impl Command {
    pub fn starts_playback(&self) -> bool {
        matches!(self, Command::PlayAudio | Command::ResumeVideo | Command::ShowVideo(_))
    }
}

/// The platform side of a session: executes commands against real media
/// elements and reports whether the audio context still needs a resume.
pub trait MediaBackend {
    fn execute(&mut self, command: Command);

    fn context_suspended(&self) -> bool {
        false
    }
}
