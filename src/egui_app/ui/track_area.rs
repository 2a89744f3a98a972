use super::style;
use super::*;
use crate::timeline::RegionId;
use eframe::egui::{self, Align2, FontId, Rect, Stroke, Ui};

/// Wheel scrolling over the track area; shift turns vertical wheel motion horizontal.
pub(super) fn handle_wheel(app: &mut TimelineApp, ui: &Ui, rect: Rect) {
    let hovered = ui
        .input(|i| i.pointer.hover_pos())
        .is_some_and(|pos| rect.contains(pos));
    if !hovered {
        return;
    }
    let (delta, shift) = ui.input(|i| (i.smooth_scroll_delta, i.modifiers.shift));
    if delta == egui::Vec2::ZERO {
        return;
    }
    let delta = if shift && delta.x == 0.0 {
        egui::vec2(delta.y, 0.0)
    } else {
        delta
    };
    app.controller.scroll_track_by(-delta);
}

/// Track headers; follow the vertical scroll only.
pub(super) fn render_track_controls(app: &TimelineApp, ui: &Ui, rect: Rect) {
    let palette = style::palette();
    let scroll_top = app
        .controller
        .sync()
        .region_offset(RegionId::TrackControls)
        .unwrap_or_default();
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.bg_primary);
    for index in 0..TRACK_COUNT {
        let top = rect.top() - scroll_top + index as f32 * TRACK_HEIGHT;
        let row = Rect::from_min_size(
            egui::pos2(rect.left(), top),
            egui::vec2(rect.width(), TRACK_HEIGHT),
        );
        painter.rect_filled(row.shrink(1.0), 0.0, style::track_row_fill(index));
        painter.text(
            row.left_center() + egui::vec2(10.0, 0.0),
            Align2::LEFT_CENTER,
            format!("Track {}", TRACK_COUNT - index),
            FontId::proportional(13.0),
            palette.text_primary,
        );
    }
}

/// Track rows, long-tick grid lines and the playhead line.
pub(super) fn render_tracks(app: &TimelineApp, ui: &Ui, rect: Rect) {
    let palette = style::palette();
    let offset = app.controller.sync().offset();
    let content_min = rect.min - offset;
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.bg_secondary);

    let content_width = app.controller.content_width();
    for index in 0..TRACK_COUNT {
        let row = Rect::from_min_size(
            content_min + egui::vec2(0.0, index as f32 * TRACK_HEIGHT),
            egui::vec2(content_width, TRACK_HEIGHT),
        );
        painter.rect_filled(row.shrink(1.0), 0.0, style::track_row_fill(index));
    }

    let grid = Stroke::new(1.0, style::with_alpha(palette.tick, 24));
    let visible = offset.x..offset.x + rect.width();
    for tick in app.controller.layout().ticks_in(visible) {
        if !tick.long {
            continue;
        }
        let x = content_min.x + tick.x;
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], grid);
    }

    let playhead_x = content_min.x + app.controller.playhead().visual_x();
    painter.line_segment(
        [
            egui::pos2(playhead_x, rect.top()),
            egui::pos2(playhead_x, rect.bottom()),
        ],
        Stroke::new(1.5, palette.playhead),
    );
}
