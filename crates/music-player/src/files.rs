use std::cell::RefCell;
use std::rc::Rc;

use music_player_core::{Locator, Track, TrackKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::backend::listen;

const INPUT_ID: &str = "music_file_input";
const ACCEPT: &str = "audio/*,video/*,.mp3,.wav,.ogg,.flac,.aac,.m4a,.mp4,.webm";

/// Tracks picked from the file dialog, waiting for the next frame.
pub type PendingTracks = Rc<RefCell<Vec<Track>>>;

/// Hidden multi-file `<input>` that turns selected files into tracks backed
/// by blob URLs.
pub struct FilePicker {
    input: HtmlInputElement,
}

impl FilePicker {
    pub fn attach(document: &Document, pending: PendingTracks) -> Result<Self, JsValue> {
        let input = match document.get_element_by_id(INPUT_ID) {
            Some(el) => el.dyn_into::<HtmlInputElement>()?,
            None => {
                let input = document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
                input.set_type("file");
                input.set_id(INPUT_ID);
                input.set_accept(ACCEPT);
                input.set_multiple(true);
                input.style().set_property("display", "none")?;
                document.body().ok_or("document has no body")?.append_child(&input)?;
                input
            }
        };

        let element = input.clone();
        listen(&input, "change", move |_| {
            if let Err(e) = collect_files(&element, &pending) {
                log::error!("could not read selected files: {e:?}");
            }
            // Reset so picking the same file again still fires `change`.
            element.set_value("");
        })?;

        Ok(Self { input })
    }

    pub fn open(&self) {
        self.input.click();
    }
}

fn collect_files(input: &HtmlInputElement, pending: &PendingTracks) -> Result<(), JsValue> {
    let Some(files) = input.files() else {
        return Ok(());
    };
    for i in 0..files.length() {
        let Some(file) = files.get(i) else { continue };
        let url = web_sys::Url::create_object_url_with_blob(&file)?;
        let name = file.name();
        let kind = TrackKind::detect(&file.type_(), &name);
        pending
            .borrow_mut()
            .push(Track::new(Locator::new(url), name, kind));
    }
    Ok(())
}
