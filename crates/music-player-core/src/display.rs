use crate::playback::{PlaybackMachine, PlaybackStatus};
use crate::playlist::Playlist;
use crate::progress::Progress;

pub const NO_TRACK_LABEL: &str = "No track playing";

/// Everything the page shows as text, derived from session state on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub now_playing: String,
    pub elapsed: String,
    pub total: String,
    /// `None` while the duration is unknown; the seek bar stays put.
    pub progress_percent: Option<f64>,
    pub play_button: &'static str,
    pub autoplay_button: &'static str,
    pub shuffle_button: &'static str,
}

impl DisplayState {
    pub fn derive(machine: &PlaybackMachine, playlist: &Playlist, progress: &Progress) -> Self {
        let now_playing = match machine.current().and_then(|i| playlist.get(i)) {
            Some(track) if machine.status() != PlaybackStatus::Idle => {
                format!("Now playing: {}", track.display_name)
            }
            _ => NO_TRACK_LABEL.to_string(),
        };

        Self {
            now_playing,
            elapsed: progress.elapsed_label(),
            total: progress.total_label(),
            progress_percent: progress.percent(),
            play_button: if machine.is_playing() { "Pause" } else { "Play" },
            autoplay_button: if machine.autoplay() { "Autoplay: On" } else { "Autoplay: Off" },
            shuffle_button: if machine.shuffle() { "Shuffle: On" } else { "Shuffle: Off" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Track;

    #[test]
    fn idle_display_is_zeroed() {
        let d = DisplayState::derive(
            &PlaybackMachine::default(),
            &Playlist::new(),
            &Progress::default(),
        );
        assert_eq!(d.now_playing, NO_TRACK_LABEL);
        assert_eq!(d.elapsed, "0:00");
        assert_eq!(d.total, "0:00");
        assert_eq!(d.progress_percent, None);
        assert_eq!(d.play_button, "Play");
        assert_eq!(d.autoplay_button, "Autoplay: Off");
        assert_eq!(d.shuffle_button, "Shuffle: Off");
    }

    #[test]
    fn playing_display_names_track() {
        let mut p = Playlist::new();
        p.append(Track::audio("blob:a", "intro.mp3"));
        let mut m = PlaybackMachine::new(true, true);
        m.select_track(&p, 0).unwrap();
        let mut progress = Progress::default();
        progress.update(65.0, 130.0);

        let d = DisplayState::derive(&m, &p, &progress);
        assert_eq!(d.now_playing, "Now playing: intro.mp3");
        assert_eq!(d.elapsed, "1:05");
        assert_eq!(d.total, "2:10");
        assert_eq!(d.progress_percent, Some(50.0));
        assert_eq!(d.play_button, "Pause");
        assert_eq!(d.autoplay_button, "Autoplay: On");
        assert_eq!(d.shuffle_button, "Shuffle: On");
    }
}
