use super::style;
use super::*;
use crate::timeline::RegionId;
use eframe::egui::{self, Align2, FontId, Rect, Sense, Shape, Stroke, Ui};

const LONG_TICK_TOP: f32 = 18.0;
const SHORT_TICK_TOP: f32 = 28.0;
const TICK_BOTTOM: f32 = 39.0;
const LABEL_BASELINE: f32 = 11.0;
const MARKER_SIZE: f32 = 5.0;

/// Draw ticks, labels, markers and the playhead head, and handle playhead input.
pub(super) fn render_ruler(app: &mut TimelineApp, ui: &mut Ui, rect: Rect) {
    let palette = style::palette();
    let response = ui.interact(rect, ui.id().with("timeline_ruler"), Sense::click_and_drag());
    let scroll_left = app
        .controller
        .sync()
        .region_offset(RegionId::Ruler)
        .unwrap_or_default();
    let origin_x = rect.left() - scroll_left;
    let to_local = |x: f32| x - origin_x;

    for event in button_events(ui) {
        if event.pressed && event.button == PointerButton::Primary && rect.contains(event.pos) {
            let now = ui.input(|i| i.time);
            app.controller.ruler_press(to_local(event.pos.x), now);
        }
    }
    if response.dragged_by(PointerButton::Primary)
        && let Some(pos) = response.interact_pointer_pos()
    {
        let primary_down = ui.input(|i| i.pointer.primary_down());
        app.controller.ruler_drag(to_local(pos.x), primary_down);
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.bg_primary);

    let stroke = Stroke::new(1.0, palette.tick);
    let visible = scroll_left..scroll_left + rect.width();
    for tick in app.controller.layout().ticks_in(visible) {
        let x = origin_x + tick.x;
        let top = if tick.long { LONG_TICK_TOP } else { SHORT_TICK_TOP };
        painter.line_segment(
            [
                egui::pos2(x, rect.top() + TICK_BOTTOM),
                egui::pos2(x, rect.top() + top),
            ],
            stroke,
        );
    }

    let font = FontId::proportional(11.0);
    for label in app.controller.visible_labels() {
        let anchor = if label.index == 0 {
            Align2::LEFT_CENTER
        } else {
            Align2::CENTER_CENTER
        };
        painter.text(
            egui::pos2(origin_x + label.x, rect.top() + LABEL_BASELINE),
            anchor,
            label.text,
            font.clone(),
            palette.tick,
        );
    }

    let scale = *app.controller.scale();
    for &marker in app.controller.markers() {
        let x = origin_x + scale.pixel_at(marker);
        let tip = egui::pos2(x, rect.bottom() - 1.0);
        painter.add(Shape::convex_polygon(
            vec![
                egui::pos2(x - MARKER_SIZE, tip.y - MARKER_SIZE * 1.6),
                egui::pos2(x + MARKER_SIZE, tip.y - MARKER_SIZE * 1.6),
                tip,
            ],
            palette.marker,
            Stroke::NONE,
        ));
    }

    let head_x = origin_x + app.controller.playhead().visual_x();
    painter.add(Shape::convex_polygon(
        vec![
            egui::pos2(head_x - 6.0, rect.top() + LONG_TICK_TOP),
            egui::pos2(head_x + 6.0, rect.top() + LONG_TICK_TOP),
            egui::pos2(head_x, rect.top() + TICK_BOTTOM),
        ],
        palette.playhead,
        Stroke::NONE,
    ));
    painter.line_segment(
        [egui::pos2(rect.left(), rect.bottom()), egui::pos2(rect.right(), rect.bottom())],
        Stroke::new(1.0, palette.panel_outline),
    );
}
