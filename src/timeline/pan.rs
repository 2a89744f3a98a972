//! Middle-button panning of the track area.
//!
//! A gesture starts on a middle press inside the track area and only ends on
//! a middle release seen anywhere in the window, so a fast drag that leaves the
//! track area cannot leave the pan stuck. The dragging cursor is a separate
//! flag that any release inside the track area clears.

use egui::{PointerButton, Pos2, Vec2};

/// Valid scroll range of the track area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBounds {
    pub max: Vec2,
}

impl ScrollBounds {
    /// Bounds for `content` laid out in a `viewport`.
    pub fn new(content: Vec2, viewport: Vec2) -> Self {
        Self {
            max: (content - viewport).max(Vec2::ZERO),
        }
    }

    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        offset.clamp(Vec2::ZERO, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PanGesture {
    anchor_scroll: Vec2,
    anchor_pointer: Pos2,
}

/// Pan gesture owned by the track area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanState {
    gesture: Option<PanGesture>,
    dragging_cursor: bool,
}

impl PanState {
    /// Begin a pan on a middle press. Other buttons are ignored.
    pub fn press(&mut self, button: PointerButton, scroll: Vec2, pointer: Pos2) -> bool {
        if button != PointerButton::Middle {
            return false;
        }
        self.gesture = Some(PanGesture {
            anchor_scroll: scroll,
            anchor_pointer: pointer,
        });
        self.dragging_cursor = true;
        tracing::debug!(x = scroll.x, y = scroll.y, "Pan started");
        true
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn shows_dragging_cursor(&self) -> bool {
        self.dragging_cursor
    }

    /// Scroll target for the pointer at `pointer`, or `None` when no pan is active.
    ///
    /// The offset moves opposite to the pointer: `anchor + (anchor_pointer - pointer)`.
    pub fn drag(&self, pointer: Pos2, bounds: ScrollBounds) -> Option<Vec2> {
        let gesture = self.gesture?;
        let delta = gesture.anchor_pointer - pointer;
        Some(bounds.clamp(gesture.anchor_scroll + delta))
    }

    /// Any button released inside the track area drops the dragging cursor.
    pub fn release_in_container(&mut self, _button: PointerButton) {
        self.dragging_cursor = false;
    }

    /// A middle release anywhere ends the pan, with or without a captured press.
    pub fn release_anywhere(&mut self, button: PointerButton) {
        if button != PointerButton::Middle {
            return;
        }
        if self.gesture.take().is_some() {
            tracing::debug!("Pan finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn bounds() -> ScrollBounds {
        ScrollBounds::new(vec2(5000.0, 900.0), vec2(800.0, 300.0))
    }

    #[test]
    fn middle_press_starts_pan_with_dragging_cursor() {
        let mut pan = PanState::default();
        assert!(pan.press(PointerButton::Middle, vec2(100.0, 0.0), pos2(400.0, 50.0)));
        assert!(pan.is_active());
        assert!(pan.shows_dragging_cursor());
    }

    #[test]
    fn other_buttons_do_not_pan() {
        let mut pan = PanState::default();
        assert!(!pan.press(PointerButton::Primary, Vec2::ZERO, pos2(0.0, 0.0)));
        assert!(!pan.is_active());
        assert_eq!(pan.drag(pos2(10.0, 10.0), bounds()), None);
    }

    #[test]
    fn drag_offsets_anchor_by_pointer_delta() {
        let mut pan = PanState::default();
        pan.press(PointerButton::Middle, vec2(1000.0, 100.0), pos2(400.0, 200.0));
        // Pointer moved 150px left and 40px up.
        let target = pan.drag(pos2(250.0, 160.0), bounds()).unwrap();
        assert_eq!(target, vec2(1150.0, 140.0));
        // Pointer moved right: content follows, offset shrinks.
        let target = pan.drag(pos2(500.0, 200.0), bounds()).unwrap();
        assert_eq!(target, vec2(900.0, 100.0));
    }

    #[test]
    fn drag_is_clamped_to_scroll_range() {
        let mut pan = PanState::default();
        pan.press(PointerButton::Middle, vec2(100.0, 0.0), pos2(400.0, 200.0));
        assert_eq!(pan.drag(pos2(900.0, 500.0), bounds()), Some(Vec2::ZERO));
        assert_eq!(
            pan.drag(pos2(-9000.0, -9000.0), bounds()),
            Some(vec2(4200.0, 600.0))
        );
    }

    #[test]
    fn press_move_release_lands_on_anchor_plus_delta() {
        let mut pan = PanState::default();
        pan.press(PointerButton::Middle, vec2(300.0, 0.0), pos2(500.0, 100.0));
        let last = pan.drag(pos2(380.0, 100.0), bounds());
        pan.release_in_container(PointerButton::Middle);
        pan.release_anywhere(PointerButton::Middle);
        assert_eq!(last, Some(vec2(420.0, 0.0)));
        assert!(!pan.is_active());
        assert_eq!(pan.drag(pos2(0.0, 0.0), bounds()), None);
    }

    #[test]
    fn release_anywhere_clears_without_prior_press() {
        let mut pan = PanState::default();
        pan.release_anywhere(PointerButton::Middle);
        assert!(!pan.is_active());
    }

    #[test]
    fn only_middle_release_ends_the_pan() {
        let mut pan = PanState::default();
        pan.press(PointerButton::Middle, Vec2::ZERO, pos2(0.0, 0.0));
        pan.release_anywhere(PointerButton::Primary);
        assert!(pan.is_active());
        pan.release_anywhere(PointerButton::Middle);
        assert!(!pan.is_active());
    }

    #[test]
    fn container_release_clears_cursor_for_any_button() {
        let mut pan = PanState::default();
        pan.press(PointerButton::Middle, Vec2::ZERO, pos2(0.0, 0.0));
        pan.release_in_container(PointerButton::Secondary);
        assert!(!pan.shows_dragging_cursor());
        assert!(pan.is_active());
    }

    #[test]
    fn bounds_never_go_negative() {
        let small = ScrollBounds::new(vec2(100.0, 100.0), vec2(800.0, 600.0));
        assert_eq!(small.max, Vec2::ZERO);
    }
}
