use egui::{Color32, Pos2, Rect, Sense, Ui, Vec2};
use music_player_core::{
    Band, Bar, DisplayState, MediaBackend, PlayerSession, SpectrumSource, Surface, TrackKind,
    Visualizer,
};

const BACKGROUND: Color32 = Color32::from_rgb(10, 10, 20);

/// Requests the panel cannot satisfy on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    AddFiles,
}

pub fn controls_panel<B: MediaBackend>(
    ui: &mut Ui,
    session: &mut PlayerSession<B>,
) -> Option<PanelAction> {
    let mut action = None;
    let display = session.display();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("🎵 Music Player");
        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("⏮").clicked() {
                session.previous();
            }
            if ui.button(display.play_button).clicked() {
                session.toggle_play_pause();
            }
            if ui.button("⏭").clicked() {
                session.next();
            }
        });
        ui.horizontal(|ui| {
            let autoplay = session.playback().autoplay();
            if ui.selectable_label(autoplay, display.autoplay_button).clicked() {
                session.toggle_autoplay();
            }
            let shuffle = session.playback().shuffle();
            if ui.selectable_label(shuffle, display.shuffle_button).clicked() {
                session.toggle_shuffle();
            }
        });

        ui.add_space(4.0);
        seek_row(ui, session, &display);

        ui.horizontal(|ui| {
            ui.label("🔊");
            let mut volume = session.equalizer().volume;
            if ui
                .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                .changed()
            {
                session.set_volume(volume);
            }
        });

        ui.collapsing("🎚️ Equalizer", |ui| {
            let range = session.equalizer().gain_range();
            for band in Band::ALL {
                let mut gain = session.equalizer().band(band);
                let slider = egui::Slider::new(&mut gain, range.clone())
                    .text(band.label())
                    .suffix(" dB");
                if ui.add(slider).changed() {
                    session.set_band_gain(band, gain);
                }
            }
        });

        ui.separator();
        if playlist_section(ui, session) {
            action = Some(PanelAction::AddFiles);
        }
    });

    action
}

fn seek_row<B: MediaBackend>(ui: &mut Ui, session: &mut PlayerSession<B>, display: &DisplayState) {
    ui.horizontal(|ui| {
        ui.label(&display.elapsed);
        let mut percent = display.progress_percent.unwrap_or(0.0);
        let slider = egui::Slider::new(&mut percent, 0.0..=100.0).show_value(false);
        if ui.add_enabled(display.progress_percent.is_some(), slider).changed() {
            session.seek(percent);
        }
        ui.label(&display.total);
    });
}

/// Returns true when the user asked to add files.
fn playlist_section<B: MediaBackend>(ui: &mut Ui, session: &mut PlayerSession<B>) -> bool {
    let mut add_files = false;

    ui.collapsing("🎶 Playlist", |ui| {
        ui.horizontal(|ui| {
            if ui.button("➕ Add files").clicked() {
                add_files = true;
            }
            if ui.button("🗑 Clear").clicked() {
                session.clear();
            }
        });

        if session.playlist().is_empty() {
            ui.colored_label(Color32::GRAY, "Playlist is empty");
            return;
        }

        let mut play_idx = None;
        let mut remove_idx = None;
        egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
            for (idx, track) in session.playlist().iter().enumerate() {
                let is_current = session.current_index() == Some(idx);
                let icon = match track.kind {
                    TrackKind::Audio => "🎵",
                    TrackKind::Video => "🎬",
                };
                ui.horizontal(|ui| {
                    let label = format!("{icon} {}", track.display_name);
                    if ui.selectable_label(is_current, label).clicked() {
                        play_idx = Some(idx);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Remove").clicked() {
                            remove_idx = Some(idx);
                        }
                    });
                });
            }
        });

        if let Some(i) = play_idx {
            if let Err(e) = session.select_track(i) {
                log::warn!("ignored playlist click: {e}");
            }
        }
        if let Some(i) = remove_idx {
            if let Err(e) = session.remove_at(i) {
                log::warn!("ignored remove: {e}");
            }
        }
    });

    add_files
}

pub fn now_playing(ui: &mut Ui, display: &DisplayState) {
    ui.horizontal(|ui| {
        ui.strong(&display.now_playing);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("{} / {}", display.elapsed, display.total));
        });
    });
}

/// Clear `rect` and paint the current spectrum into it.
pub fn draw_spectrum(
    ui: &mut Ui,
    rect: Rect,
    visualizer: &mut Visualizer,
    source: &impl SpectrumSource,
) {
    ui.allocate_rect(rect, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let [r, g, b] = visualizer.color();
    let color = Color32::from_rgb(r, g, b);
    let surface = Surface {
        width: rect.width(),
        height: rect.height(),
    };
    for bar in visualizer.frame(source, surface) {
        if bar.height > 0.0 {
            painter.rect_filled(bar_rect(rect.min, bar), 0.0, color);
        }
    }
}

pub fn bar_rect(origin: Pos2, bar: &Bar) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(bar.x, bar.y),
        Vec2::new(bar.width, bar.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_rect_is_offset_by_surface_origin() {
        let bar = Bar {
            x: 11.0,
            y: 90.0,
            width: 10.0,
            height: 10.0,
        };
        let rect = bar_rect(Pos2::new(100.0, 20.0), &bar);
        assert_eq!(rect.min, Pos2::new(111.0, 110.0));
        assert_eq!(rect.max, Pos2::new(121.0, 120.0));
    }
}
