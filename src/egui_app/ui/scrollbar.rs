use super::style;
use super::*;
use eframe::egui::{self, Rect, Ui};

/// Horizontal scrollbar for the track area; click or drag to jump.
pub(super) fn render_track_scrollbar(app: &mut TimelineApp, ui: &mut Ui, scroll_rect: Rect) {
    let palette = style::palette();
    let scroll_resp = ui.interact(
        scroll_rect,
        ui.id().with("track_scrollbar"),
        egui::Sense::click_and_drag(),
    );
    ui.painter()
        .rect_filled(scroll_rect, 0.0, style::with_alpha(palette.bg_primary, 140));

    let content_width = app.controller.content_width();
    if content_width <= f32::EPSILON || scroll_rect.width() <= f32::EPSILON {
        return;
    }
    let offset = app.controller.sync().offset();
    let visible_fraction = (scroll_rect.width() / content_width).min(1.0);
    let start_fraction = offset.x / content_width;
    let indicator_rect = Rect::from_min_size(
        egui::pos2(
            scroll_rect.left() + scroll_rect.width() * start_fraction,
            scroll_rect.top(),
        ),
        egui::vec2(
            (scroll_rect.width() * visible_fraction).max(8.0),
            scroll_rect.height(),
        ),
    );
    ui.painter()
        .rect_filled(indicator_rect, 0.0, style::with_alpha(palette.accent_ice, 200));

    if (scroll_resp.dragged() || scroll_resp.clicked())
        && let Some(pos) = scroll_resp.interact_pointer_pos()
    {
        let frac = ((pos.x - scroll_rect.left()) / scroll_rect.width()).clamp(0.0, 1.0);
        let visible_width = scroll_rect.width().min(content_width);
        let target_x = frac * content_width - visible_width / 2.0;
        app.controller
            .scroll_track_to(egui::vec2(target_x, offset.y));
    }
}
