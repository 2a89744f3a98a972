//! egui renderer for the timeline ruler demo.

use eframe::egui::{self, Color32, Frame, PointerButton, Pos2, Rect, RichText, Ui};

use crate::config::{self, RulerSettings};
use crate::egui_app::controller::TimelineController;
use crate::timecode::Timecode;

mod progress_bar;
mod ruler_view;
mod scrollbar;
pub mod style;
mod track_area;

/// Smallest window the timeline stays usable in.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 360.0);

const TRACK_CONTROLS_WIDTH: f32 = 140.0;
const RULER_HEIGHT: f32 = 40.0;
const PROGRESS_HEIGHT: f32 = 6.0;
const SCROLLBAR_HEIGHT: f32 = 12.0;
const TRACK_COUNT: usize = 6;
const TRACK_HEIGHT: f32 = 64.0;

/// Screen areas of the timeline for one frame.
#[derive(Clone, Copy, Debug)]
struct TimelineRects {
    corner: Rect,
    ruler: Rect,
    progress: Rect,
    controls: Rect,
    tracks: Rect,
    scrollbar: Rect,
}

impl TimelineRects {
    fn split(full: Rect) -> Self {
        let header_bottom = full.top() + RULER_HEIGHT + PROGRESS_HEIGHT;
        let body_bottom = (full.bottom() - SCROLLBAR_HEIGHT).max(header_bottom);
        let split_x = (full.left() + TRACK_CONTROLS_WIDTH).min(full.right());
        Self {
            corner: Rect::from_min_max(full.min, egui::pos2(split_x, header_bottom)),
            ruler: Rect::from_min_max(
                egui::pos2(split_x, full.top()),
                egui::pos2(full.right(), full.top() + RULER_HEIGHT),
            ),
            progress: Rect::from_min_max(
                egui::pos2(split_x, full.top() + RULER_HEIGHT),
                egui::pos2(full.right(), header_bottom),
            ),
            controls: Rect::from_min_max(
                egui::pos2(full.left(), header_bottom),
                egui::pos2(split_x, body_bottom),
            ),
            tracks: Rect::from_min_max(
                egui::pos2(split_x, header_bottom),
                egui::pos2(full.right(), body_bottom),
            ),
            scrollbar: Rect::from_min_max(
                egui::pos2(split_x, body_bottom),
                egui::pos2(full.right(), full.bottom()),
            ),
        }
    }
}

/// A pointer button transition seen this frame.
#[derive(Clone, Copy, Debug)]
struct ButtonEvent {
    pos: Pos2,
    button: PointerButton,
    pressed: bool,
}

fn button_events(ui: &Ui) -> Vec<ButtonEvent> {
    ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => Some(ButtonEvent {
                    pos: *pos,
                    button: *button,
                    pressed: *pressed,
                }),
                _ => None,
            })
            .collect()
    })
}

/// eframe app hosting the ruler, progress bar, track controls and track area.
pub struct TimelineApp {
    controller: TimelineController,
    visuals_set: bool,
}

impl TimelineApp {
    pub fn new(settings: RulerSettings) -> Self {
        Self {
            controller: TimelineController::new(settings),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("timeline_toolbar")
            .frame(Frame::NONE.fill(palette.bg_primary).inner_margin(6.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut zoom = self.controller.scale().scale();
                    let zoom_slider = egui::Slider::new(&mut zoom, 0.5..=120.0)
                        .logarithmic(true)
                        .suffix(" s / tick")
                        .text("Zoom");
                    if ui.add(zoom_slider).changed() {
                        self.controller.set_zoom(zoom);
                    }
                    ui.separator();
                    let mut duration = self.controller.scale().duration();
                    let duration_drag = egui::DragValue::new(&mut duration)
                        .range(0.0..=36_000.0)
                        .suffix(" s");
                    ui.label(RichText::new("Duration").color(palette.text_muted));
                    if ui.add(duration_drag).changed() {
                        self.controller.set_duration(duration);
                    }
                    ui.separator();
                    if ui.button("Go to start").clicked() {
                        self.controller.seek(0.0);
                    }
                    if ui.button("Center on playhead").clicked() {
                        self.controller.scroll_to_playhead();
                    }
                    if ui.button("Add marker").clicked() {
                        self.controller.add_marker_at_playhead();
                    }
                    if ui.button("Clear markers").clicked() {
                        self.controller.clear_markers();
                    }
                    let mut host_bridge = self.controller.settings().host_bridge;
                    if ui.checkbox(&mut host_bridge, "Host bridge").changed() {
                        self.controller.set_host_bridge(host_bridge);
                    }
                    if ui.button("Save settings").clicked() {
                        self.save_settings();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let rate = self.controller.settings().frame_rate;
                        let code = Timecode::from_seconds(self.controller.playhead().seconds(), rate);
                        ui.label(RichText::new(code.to_string()).monospace().color(Color32::WHITE));
                    });
                });
            });
    }

    fn save_settings(&self) {
        if let Err(err) = config::save(self.controller.settings()) {
            tracing::warn!("Failed to save settings: {err}");
        }
    }

    fn render_timeline(&mut self, ui: &mut Ui) {
        let full = ui.available_rect_before_wrap();
        ui.allocate_rect(full, egui::Sense::hover());
        let rects = TimelineRects::split(full);
        self.controller
            .set_track_geometry(rects.tracks.size(), TRACK_COUNT as f32 * TRACK_HEIGHT);

        self.handle_pointer_buttons(ui, rects);
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.cancel_playhead();
        }
        track_area::handle_wheel(self, ui, rects.tracks);
        if self.controller.is_panning()
            && let Some(pos) = ui.input(|i| i.pointer.latest_pos())
        {
            self.controller.pan_drag(pos);
        }
        if self.controller.shows_drag_cursor() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }

        ui.painter()
            .rect_filled(rects.corner, 0.0, style::palette().bg_primary);
        ruler_view::render_ruler(self, ui, rects.ruler);
        progress_bar::render_progress(self, ui, rects.progress);
        track_area::render_track_controls(self, ui, rects.controls);
        track_area::render_tracks(self, ui, rects.tracks);
        scrollbar::render_track_scrollbar(self, ui, rects.scrollbar);
    }

    /// Middle presses in the track area start a pan; releases anywhere in the
    /// window reach the body-level tracker.
    fn handle_pointer_buttons(&mut self, ui: &Ui, rects: TimelineRects) {
        for event in button_events(ui) {
            self.controller
                .pointer_button(event.pos, event.button, event.pressed, rects.tracks);
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.begin_frame();
        self.render_toolbar(ctx);
        egui::CentralPanel::default()
            .frame(Frame::NONE.fill(style::palette().bg_secondary))
            .show(ctx, |ui| self.render_timeline(ui));

        let now = ctx.input(|i| i.time);
        if self.controller.advance_playhead(now) {
            ctx.request_repaint();
        }
        if self.controller.end_frame() {
            ctx.request_repaint();
        }
    }
}
