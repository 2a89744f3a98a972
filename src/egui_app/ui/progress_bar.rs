use super::style;
use super::*;
use crate::timeline::RegionId;
use eframe::egui::{self, Rect, Ui};

/// Thin strip under the ruler showing how far the playhead has travelled.
pub(super) fn render_progress(app: &TimelineApp, ui: &Ui, rect: Rect) {
    let palette = style::palette();
    let scroll_left = app
        .controller
        .sync()
        .region_offset(RegionId::Progress)
        .unwrap_or_default();
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.bg_tertiary);

    let content_left = rect.left() - scroll_left;
    let end_x = content_left + app.controller.scale().pixel_at(app.controller.scale().duration());
    let played_x = content_left + app.controller.playhead().visual_x();
    let played = Rect::from_min_max(rect.min, egui::pos2(played_x.min(end_x), rect.bottom()));
    if played.width() > 0.0 {
        painter.rect_filled(played, 0.0, style::with_alpha(palette.accent_ice, 120));
    }
}
