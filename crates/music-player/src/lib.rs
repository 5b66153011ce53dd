//! Browser shell for the music player.
//!
//! The core session lives in `music-player-core`; this crate wires it to an
//! `<audio>` element, a Web Audio equalizer graph, a video popup and an egui
//! canvas. Everything except the egui panels and the play gate is wasm32-only.

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod gate;
mod ui;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod backend;
#[cfg(target_arch = "wasm32")]
mod files;
#[cfg(target_arch = "wasm32")]
mod video;

pub use ui::{bar_rect, controls_panel, draw_spectrum, now_playing, PanelAction};

#[cfg(target_arch = "wasm32")]
pub use app::{start, MusicPlayerApp};

#[cfg(target_arch = "wasm32")]
mod app {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use eframe::egui;
    use music_player_core::{PlayerConfig, PlayerSession, Visualizer};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::Document;

    use crate::backend::{EventQueue, WebMediaBackend};
    use crate::files::{FilePicker, PendingTracks};
    use crate::ui::{self, PanelAction};

    const CANVAS_ID: &str = "music_player_canvas";
    const CONFIG_ID: &str = "player_config";

    pub struct MusicPlayerApp {
        session: PlayerSession<WebMediaBackend>,
        visualizer: Visualizer,
        events: EventQueue,
        pending_tracks: PendingTracks,
        picker: FilePicker,
    }

    impl MusicPlayerApp {
        pub fn new(
            _cc: &eframe::CreationContext<'_>,
            config: &PlayerConfig,
        ) -> Result<Self, JsValue> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or("no document on window")?;

            let events: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
            let pending_tracks: PendingTracks = Rc::new(RefCell::new(Vec::new()));

            let backend = WebMediaBackend::new(config, events.clone())?;
            let picker = FilePicker::attach(&document, pending_tracks.clone())?;

            Ok(Self {
                session: PlayerSession::new(backend, config),
                visualizer: Visualizer::new(config.visualizer.clone()),
                events,
                pending_tracks,
                picker,
            })
        }

        fn process_pending_tracks(&mut self) {
            let tracks = std::mem::take(&mut *self.pending_tracks.borrow_mut());
            self.session.add_tracks(tracks);
        }

        fn process_events(&mut self) {
            // The queue borrow must end before dispatch: a failed play() pushes synchronously.
            loop {
                let Some(event) = self.events.borrow_mut().pop_front() else {
                    break;
                };
                self.session.dispatch(event);
            }
        }
    }

    impl eframe::App for MusicPlayerApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            self.process_pending_tracks();
            self.process_events();

            // The spectrum is redrawn every frame
            ctx.request_repaint();

            egui::SidePanel::left("controls_panel")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| {
                    if ui::controls_panel(ui, &mut self.session) == Some(PanelAction::AddFiles) {
                        self.picker.open();
                    }
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                ui::now_playing(ui, &self.session.display());
                ui.separator();
                let rect = ui.available_rect_before_wrap();
                ui::draw_spectrum(ui, rect, &mut self.visualizer, self.session.backend().graph());
            });
        }
    }

    fn load_config(document: &Document) -> PlayerConfig {
        let Some(text) = document
            .get_element_by_id(CONFIG_ID)
            .and_then(|el| el.text_content())
        else {
            return PlayerConfig::default();
        };
        match PlayerConfig::from_json_str(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring #{CONFIG_ID}: {e}");
                PlayerConfig::default()
            }
        }
    }

    fn create_app(
        cc: &eframe::CreationContext<'_>,
        config: &PlayerConfig,
    ) -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
        let app = MusicPlayerApp::new(cc, config)
            .map_err(|e| format!("player setup failed: {e:?}"))?;
        Ok(Box::new(app))
    }

    async fn run() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document on window")?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas element with id 'music_player_canvas'")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        let config = load_config(&document);

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| create_app(cc, &config)),
            )
            .await
    }

    // WASM entry point
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        // Redirect `log` records to the browser console
        eframe::WebLogger::init(log::LevelFilter::Debug).ok();

        wasm_bindgen_futures::spawn_local(async {
            if let Err(e) = run().await {
                log::error!("music player failed to start: {e:?}");
            }
        });

        Ok(())
    }
}
