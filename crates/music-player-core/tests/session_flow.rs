use music_player_core::{
    Command, GraphTopology, Locator, MediaBackend, PlayerConfig, PlayerEvent, PlayerSession,
    Presentation, SpectrumSource, Surface, Track, Visualizer, NO_TRACK_LABEL,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingBackend {
    commands: Vec<Command>,
    spectrum: Vec<u8>,
}

impl MediaBackend for RecordingBackend {
    fn execute(&mut self, command: Command) {
        self.commands.push(command);
    }
}

impl SpectrumSource for RecordingBackend {
    fn bin_count(&self) -> usize {
        self.spectrum.len()
    }

    fn fill_frequency_data(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.spectrum);
    }
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session(seed: u64) -> PlayerSession<RecordingBackend> {
    init_logs();
    PlayerSession::with_rng(
        RecordingBackend::default(),
        &PlayerConfig::default(),
        StdRng::seed_from_u64(seed),
    )
}

#[test]
fn autoplay_walks_mixed_playlist_in_order() {
    let mut s = session(1);
    s.add_track(Track::audio("blob:0", "first.mp3"));
    s.add_track(Track::audio("blob:1", "second.mp3"));
    s.add_track(Track::video("blob:2", "clip.mp4"));
    s.set_autoplay(true);
    s.set_shuffle(false);

    s.select_track(0).unwrap();
    let mut order = vec![s.current_index().unwrap()];
    let mut presentations = vec![s.playback().presentation()];
    for _ in 0..3 {
        s.dispatch(PlayerEvent::TrackEnded);
        order.push(s.current_index().unwrap());
        presentations.push(s.playback().presentation());
    }

    assert_eq!(order, [0, 1, 2, 0]);
    assert_eq!(
        presentations,
        [Presentation::Audio, Presentation::Audio, Presentation::Video, Presentation::Audio]
    );

    let cmds = &s.backend().commands;
    assert!(cmds.contains(&Command::ShowVideo(Locator::new("blob:2"))));
    assert!(!cmds.contains(&Command::LoadAudio(Locator::new("blob:2"))));

    // Going to video unloads audio; coming back closes the popup first.
    let show = cmds.iter().position(|c| matches!(c, Command::ShowVideo(_))).unwrap();
    assert_eq!(&cmds[show - 2..show], &[Command::PauseAudio, Command::UnloadAudio]);
    assert_eq!(&cmds[show + 1..show + 3], &[Command::CloseVideo, Command::ExitFullscreen]);
    assert_eq!(cmds.last(), Some(&Command::PlayAudio));
}

#[test]
fn shuffle_is_uniform_and_may_repeat() {
    const TRACKS: usize = 4;
    const TRIALS: usize = 20_000;

    let mut s = session(42);
    for i in 0..TRACKS {
        s.add_track(Track::audio(format!("blob:{i}"), format!("{i}.mp3")));
    }
    s.set_autoplay(true);
    s.set_shuffle(true);
    s.select_track(0).unwrap();

    let mut counts = [0usize; TRACKS];
    let mut repeats = 0;
    for _ in 0..TRIALS {
        let before = s.current_index();
        s.dispatch(PlayerEvent::TrackEnded);
        let after = s.current_index().unwrap();
        counts[after] += 1;
        if before == Some(after) {
            repeats += 1;
        }
    }

    let expected = TRIALS / TRACKS;
    for (i, &count) in counts.iter().enumerate() {
        assert!(count.abs_diff(expected) < expected / 10, "track {i} chosen {count} times");
    }
    assert!(repeats > 0, "shuffle never repeated the current track");
}

#[test]
fn removing_last_track_resets_display() {
    let mut s = session(3);
    s.add_track(Track::audio("blob:a", "a.mp3"));
    s.select_track(0).unwrap();
    s.dispatch(PlayerEvent::MetadataLoaded { duration: 180.0 });
    s.dispatch(PlayerEvent::PositionChanged { current_time: 61.0, duration: 180.0 });
    assert_eq!(s.display().elapsed, "1:01");

    s.remove_at(0).unwrap();
    let d = s.display();
    assert_eq!(d.now_playing, NO_TRACK_LABEL);
    assert_eq!(d.elapsed, "0:00");
    assert_eq!(d.total, "0:00");
    assert_eq!(s.current_index(), None);
}

#[test]
fn removal_never_leaves_index_past_end() {
    for len in 1..5 {
        for current in 0..len {
            for removed in 0..len {
                let mut s = session(5);
                for i in 0..len {
                    s.add_track(Track::audio(format!("blob:{i}"), format!("{i}")));
                }
                s.select_track(current).unwrap();
                s.remove_at(removed).unwrap();
                if let Some(idx) = s.current_index() {
                    assert!(idx < s.playlist().len());
                    let name = &s.playlist().get(idx).unwrap().display_name;
                    assert_eq!(name, &current.to_string());
                } else {
                    assert_eq!(removed, current);
                }
            }
        }
    }
}

#[test]
fn toggle_on_empty_playlist_does_nothing() {
    let mut s = session(9);
    s.toggle_play_pause();
    s.next();
    s.previous();
    s.dispatch(PlayerEvent::TrackEnded);
    assert!(s.backend().commands.is_empty());
    assert_eq!(s.display().play_button, "Play");
}

#[test]
fn visualizer_reads_backend_spectrum() {
    let topology = GraphTopology::equalizer(&PlayerConfig::default()).unwrap();
    let mut backend = RecordingBackend::default();
    backend.spectrum = vec![255; topology.bin_count()];

    let mut vis = Visualizer::new(PlayerConfig::default().visualizer);
    let bars = vis.frame(&backend, Surface { width: 256.0, height: 150.0 });
    assert_eq!(bars.len(), 128);
    assert!(bars.iter().all(|b| b.height == 127.5 && b.y == 22.5));
}

#[test]
fn video_paused_from_its_own_controls_resumes_in_one_press() {
    let mut s = session(9);
    s.add_track(Track::video("blob:v", "clip.mp4"));
    s.select_track(0).unwrap();
    assert_eq!(s.display().play_button, "Pause");

    s.dispatch(PlayerEvent::VideoStateChanged { playing: false });
    assert_eq!(s.display().play_button, "Play");

    s.backend_mut().commands.clear();
    s.toggle_play_pause();
    assert_eq!(s.backend().commands, [Command::ResumeVideo]);
    assert_eq!(s.display().play_button, "Pause");
}
