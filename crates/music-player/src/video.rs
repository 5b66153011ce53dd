use music_player_core::{Locator, PlayerEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlVideoElement};

use crate::backend::{listen, play_media, EventQueue};

const POPUP_ID: &str = "video_popup";
const PLAYER_ID: &str = "video_player";

const POPUP_STYLE: &str = "position:fixed; bottom:10px; right:10px; z-index:9999; \
    display:none; align-items:center; justify-content:center; \
    background:#000; border-radius:8px; padding:5px; \
    box-shadow: 0 4px 12px rgba(0,0,0,0.5);";

/// Overlay that plays video tracks outside the audio graph.
pub struct VideoPopup {
    document: Document,
    container: HtmlElement,
    player: HtmlVideoElement,
    events: EventQueue,
}

impl VideoPopup {
    /// Reuse the host page's popup if it has one, otherwise build it.
    pub fn attach(document: &Document, events: EventQueue) -> Result<Self, JsValue> {
        let container = match document.get_element_by_id(POPUP_ID) {
            Some(el) => el.dyn_into::<HtmlElement>()?,
            None => {
                let div = document.create_element("div")?.dyn_into::<HtmlElement>()?;
                div.set_id(POPUP_ID);
                div.set_attribute("style", POPUP_STYLE)?;
                document.body().ok_or("document has no body")?.append_child(&div)?;
                div
            }
        };

        let player = match document.get_element_by_id(PLAYER_ID) {
            Some(el) => el.dyn_into::<HtmlVideoElement>()?,
            None => {
                let video = document.create_element("video")?.dyn_into::<HtmlVideoElement>()?;
                video.set_id(PLAYER_ID);
                video.set_controls(true);
                video.set_width(480);
                container.append_child(&video)?;
                video
            }
        };

        let queue = events.clone();
        listen(&player, "ended", move |_| {
            queue.borrow_mut().push_back(PlayerEvent::TrackEnded);
        })?;

        // Native controls can pause or resume behind the session's back.
        for (event, playing) in [("play", true), ("pause", false)] {
            let queue = events.clone();
            listen(&player, event, move |_| {
                queue
                    .borrow_mut()
                    .push_back(PlayerEvent::VideoStateChanged { playing });
            })?;
        }

        Ok(Self {
            document: document.clone(),
            container,
            player,
            events,
        })
    }

    pub fn show(&self, locator: &Locator) {
        self.player.set_src(locator.as_str());
        self.set_display("flex");
        play_media(&self.player, &self.events);
        if let Err(e) = self.container.request_fullscreen() {
            log::debug!("fullscreen request refused: {e:?}");
        }
    }

    pub fn pause(&self) {
        if let Err(e) = self.player.pause() {
            log::warn!("video pause failed: {e:?}");
        }
    }

    pub fn resume(&self) {
        play_media(&self.player, &self.events);
    }

    pub fn close(&self) {
        self.pause();
        if let Err(e) = self.player.remove_attribute("src") {
            log::warn!("could not clear video src: {e:?}");
        }
        self.player.load();
        self.set_display("none");
        exit_fullscreen(&self.document);
    }

    fn set_display(&self, value: &str) {
        if let Err(e) = self.container.style().set_property("display", value) {
            log::warn!("could not set popup display: {e:?}");
        }
    }
}

pub fn exit_fullscreen(document: &Document) {
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    }
}
