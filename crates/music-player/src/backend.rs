use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use music_player_core::{Command, GraphTopology, MediaBackend, PlayerConfig, PlayerEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Event, EventTarget, HtmlAudioElement, HtmlMediaElement};

use crate::audio::WebAudioGraph;
use crate::gate::PlayGate;
use crate::video::{exit_fullscreen, VideoPopup};

const AUDIO_ID: &str = "player_audio";

/// DOM callbacks push here; the app drains it once per frame.
pub type EventQueue = Rc<RefCell<VecDeque<PlayerEvent>>>;

/// Executes core commands against the page's audio element, the Web Audio
/// graph behind it and the video popup.
pub struct WebMediaBackend {
    document: Document,
    audio: HtmlAudioElement,
    graph: WebAudioGraph,
    video: VideoPopup,
    events: EventQueue,
    pending_resume: Option<js_sys::Promise>,
    deferred_play: PlayGate,
}

impl WebMediaBackend {
    pub fn new(config: &PlayerConfig, events: EventQueue) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document on window")?;

        let audio = match document.get_element_by_id(AUDIO_ID) {
            Some(el) => el.dyn_into::<HtmlAudioElement>()?,
            None => {
                let audio = HtmlAudioElement::new()?;
                audio.set_id(AUDIO_ID);
                document.body().ok_or("document has no body")?.append_child(&audio)?;
                audio
            }
        };
        audio.set_cross_origin(Some("anonymous"));

        let topology =
            GraphTopology::equalizer(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let graph = WebAudioGraph::realize(&topology, &audio)?;
        let video = VideoPopup::attach(&document, events.clone())?;

        let queue = events.clone();
        listen(&audio, "ended", move |_| {
            queue.borrow_mut().push_back(PlayerEvent::TrackEnded);
        })?;

        let queue = events.clone();
        let element = audio.clone();
        listen(&audio, "timeupdate", move |_| {
            queue.borrow_mut().push_back(PlayerEvent::PositionChanged {
                current_time: element.current_time(),
                duration: element.duration(),
            });
        })?;

        let queue = events.clone();
        let element = audio.clone();
        listen(&audio, "loadedmetadata", move |_| {
            queue.borrow_mut().push_back(PlayerEvent::MetadataLoaded {
                duration: element.duration(),
            });
        })?;

        Ok(Self {
            document,
            audio,
            graph,
            video,
            events,
            pending_resume: None,
            deferred_play: PlayGate::new(),
        })
    }

    pub fn graph(&self) -> &WebAudioGraph {
        &self.graph
    }

    fn play_audio(&mut self) {
        match self.pending_resume.take() {
            Some(resume) => {
                let audio: HtmlMediaElement = self.audio.clone().into();
                let events = self.events.clone();
                let ticket = self.deferred_play.arm();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(resume).await {
                        log::warn!("audio context did not resume: {e:?}");
                    }
                    if ticket.is_current() {
                        play_media(&audio, &events);
                    } else {
                        log::debug!("deferred play cancelled");
                    }
                });
            }
            None => play_media(&self.audio, &self.events),
        }
    }

    fn pause_audio(&self) {
        self.deferred_play.cancel();
        if let Err(e) = self.audio.pause() {
            log::warn!("audio pause failed: {e:?}");
        }
    }

    fn unload_audio(&self) {
        self.pause_audio();
        if let Err(e) = self.audio.remove_attribute("src") {
            log::warn!("could not clear audio src: {e:?}");
        }
        self.audio.load();
    }
}

impl MediaBackend for WebMediaBackend {
    fn execute(&mut self, command: Command) {
        log::debug!("execute {command:?}");
        match command {
            Command::LoadAudio(locator) => {
                self.audio.set_src(locator.as_str());
                self.audio.set_current_time(0.0);
            }
            Command::PlayAudio => self.play_audio(),
            Command::PauseAudio => self.pause_audio(),
            Command::UnloadAudio => self.unload_audio(),
            Command::SeekAudio(seconds) => self.audio.set_current_time(seconds),
            // Video bypasses the audio graph, so a pending resume has nothing to gate.
            Command::ShowVideo(locator) => {
                self.pending_resume = None;
                self.video.show(&locator);
            }
            Command::PauseVideo => self.video.pause(),
            Command::ResumeVideo => {
                self.pending_resume = None;
                self.video.resume();
            }
            Command::CloseVideo => self.video.close(),
            Command::ExitFullscreen => exit_fullscreen(&self.document),
            Command::ResumeContext => match self.graph.resume() {
                Ok(promise) => self.pending_resume = Some(promise),
                Err(e) => log::warn!("audio context resume failed: {e:?}"),
            },
            Command::SetFilterGain { band, gain_db } => self.graph.set_filter_gain(band, gain_db),
            Command::SetVolume(level) => self.graph.set_level(level),
            Command::ReleaseLocator(locator) => {
                if let Err(e) = web_sys::Url::revoke_object_url(locator.as_str()) {
                    log::warn!("could not revoke {locator}: {e:?}");
                }
            }
        }
    }

    fn context_suspended(&self) -> bool {
        self.graph.is_suspended()
    }
}

/// Start playback and report a refused `play()` back to the session. An
/// `AbortError` only means a newer source replaced this one.
pub fn play_media(element: &HtmlMediaElement, events: &EventQueue) {
    let promise = match element.play() {
        Ok(promise) => promise,
        Err(e) => {
            log::warn!("play() threw: {e:?}");
            events.borrow_mut().push_back(PlayerEvent::PlaybackRejected);
            return;
        }
    };

    let events = events.clone();
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            let aborted = e
                .dyn_ref::<web_sys::DomException>()
                .is_some_and(|ex| ex.name() == "AbortError");
            if !aborted {
                log::warn!("play() rejected: {e:?}");
                events.borrow_mut().push_back(PlayerEvent::PlaybackRejected);
            }
        }
    });
}

/// Attach a DOM listener for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
