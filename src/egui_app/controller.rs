//! Timeline state shared by the egui views.
//!
//! The controller owns the zoom, tick layout, scroll mediator, pan gesture and
//! playhead. Views translate pointer input into calls here and paint from the
//! read accessors; nothing in this file touches egui painting.

use egui::{PointerButton, Pos2, Rect, Vec2};

use crate::config::RulerSettings;
use crate::timeline::{
    DeferredRelayout, JsonHostBridge, LabelWindow, LayoutKey, PanState, Playhead,
    PlayheadCommands, RegionId, ScrollBounds, ScrollEvent, ScrollOutcome, ScrollSync, TickLabel,
    TickLayout, TimeScale,
};

/// Stand-in for the video player that owns the authoritative playhead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewPlayer {
    committed: f64,
    previewed: Option<f64>,
}

impl PreviewPlayer {
    pub fn committed(&self) -> f64 {
        self.committed
    }

    pub fn previewed(&self) -> Option<f64> {
        self.previewed
    }
}

impl PlayheadCommands for PreviewPlayer {
    fn move_playhead(&mut self, seconds: f64) {
        self.committed = seconds;
        tracing::debug!(seconds, "Move playhead");
    }

    fn preview_frame(&mut self, seconds: f64) {
        self.previewed = Some(seconds);
        tracing::trace!(seconds, "Preview frame");
    }
}

/// Headless timeline model driven by the egui views.
pub struct TimelineController {
    settings: RulerSettings,
    scale: TimeScale,
    layout: TickLayout,
    relayout: DeferredRelayout,
    sync: ScrollSync,
    pan: PanState,
    playhead: Playhead,
    player: PreviewPlayer,
    markers: Vec<f64>,
    viewport: Vec2,
    content: Vec2,
}

impl TimelineController {
    pub fn new(settings: RulerSettings) -> Self {
        let settings = settings.normalized();
        let scale = TimeScale::new(
            settings.scale,
            settings.tick_pixels,
            settings.duration_seconds,
        );
        let mut sync = ScrollSync::new();
        for region in [
            RegionId::TrackArea,
            RegionId::TrackControls,
            RegionId::Ruler,
            RegionId::Progress,
        ] {
            sync.subscribe(region);
        }
        if settings.host_bridge {
            tracing::info!("Host bridge enabled; scrollbar reports go to the host_bridge target");
            sync.attach_host(Box::new(JsonHostBridge));
        }
        let mut relayout = DeferredRelayout::default();
        relayout.observe(LayoutKey::new(&scale, 0));
        Self {
            playhead: Playhead::new(settings.playhead_animation()),
            settings,
            scale,
            layout: TickLayout::default(),
            relayout,
            sync,
            pan: PanState::default(),
            player: PreviewPlayer::default(),
            markers: Vec::new(),
            viewport: Vec2::ZERO,
            content: Vec2::ZERO,
        }
    }

    pub fn settings(&self) -> &RulerSettings {
        &self.settings
    }

    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    pub fn layout(&self) -> &TickLayout {
        &self.layout
    }

    pub fn playhead(&self) -> &Playhead {
        &self.playhead
    }

    pub fn player(&self) -> &PreviewPlayer {
        &self.player
    }

    pub fn markers(&self) -> &[f64] {
        &self.markers
    }

    pub fn sync(&self) -> &ScrollSync {
        &self.sync
    }

    /// Start or stop sending scrollbar reports to the embedding host.
    pub fn set_host_bridge(&mut self, enabled: bool) {
        if enabled == self.sync.has_host() {
            return;
        }
        if enabled {
            self.sync.attach_host(Box::new(JsonHostBridge));
        } else {
            self.sync.detach_host();
        }
        self.settings.host_bridge = enabled;
        tracing::info!(enabled, "Host bridge toggled");
    }

    /// Rebuild the tick layout if a change was observed last frame.
    pub fn begin_frame(&mut self) -> bool {
        if !self.relayout.take_pending() {
            return false;
        }
        self.layout = TickLayout::build(&self.scale, self.settings.min_ruler_width);
        self.playhead.rescale(&self.scale);
        tracing::debug!(
            ticks = self.layout.len(),
            width = self.layout.width(),
            "Ruler layout rebuilt"
        );
        true
    }

    /// Observe layout inputs after input handling; true when a rebuild was scheduled.
    pub fn end_frame(&mut self) -> bool {
        self.relayout
            .observe(LayoutKey::new(&self.scale, self.markers.len()))
    }

    pub fn set_zoom(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            tracing::warn!(scale, "Rejected zoom level");
            return;
        }
        self.scale.set_scale(scale);
        self.settings.scale = scale;
    }

    pub fn set_duration(&mut self, seconds: f64) {
        self.scale.set_duration(seconds);
        self.settings.duration_seconds = self.scale.duration();
    }

    pub fn add_marker_at_playhead(&mut self) {
        let seconds = self.playhead.seconds();
        if self.markers.iter().any(|marker| (marker - seconds).abs() < f64::EPSILON) {
            return;
        }
        self.markers.push(seconds);
        self.markers.sort_by(|a, b| a.total_cmp(b));
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    /// Width of the track area content.
    pub fn content_width(&self) -> f32 {
        self.scale.render_width(self.settings.min_ruler_width)
    }

    /// Record the track viewport and content size for scroll clamping.
    pub fn set_track_geometry(&mut self, viewport: Vec2, content_height: f32) {
        self.viewport = viewport.max(Vec2::ZERO);
        self.content = Vec2::new(self.content_width(), content_height.max(0.0));
        let clamped = self.bounds().clamp(self.sync.offset());
        if clamped != self.sync.offset() {
            self.scroll_track_to(clamped);
        }
    }

    pub fn bounds(&self) -> ScrollBounds {
        ScrollBounds::new(self.content, self.viewport)
    }

    /// Scroll the track area. Emits a scroll event when the clamped offset changes.
    pub fn scroll_track_to(&mut self, offset: Vec2) -> Option<ScrollOutcome> {
        let offset = self.bounds().clamp(offset);
        if offset == self.sync.offset() {
            return None;
        }
        Some(self.sync.on_scroll(ScrollEvent {
            offset,
            viewport_width: self.viewport.x,
            timeline_width: self.scale.timeline_width(0.0),
        }))
    }

    pub fn scroll_track_by(&mut self, delta: Vec2) -> Option<ScrollOutcome> {
        self.scroll_track_to(self.sync.offset() + delta)
    }

    /// Center the track area on the playhead without notifying the host.
    pub fn scroll_to_playhead(&mut self) -> Option<ScrollOutcome> {
        let x = self.playhead.visual_x() - self.viewport.x / 2.0;
        let target = self
            .bounds()
            .clamp(Vec2::new(x, self.sync.offset().y));
        if target == self.sync.offset() {
            return None;
        }
        self.sync.suppress_next_echo();
        self.scroll_track_to(target)
    }

    /// Route a window-level button transition.
    ///
    /// Presses only start a pan inside `tracks`. Releases reach the
    /// container handler when over `tracks` and the body-level tracker always,
    /// so a middle release anywhere in the window ends the pan.
    pub fn pointer_button(&mut self, pos: Pos2, button: PointerButton, pressed: bool, tracks: Rect) {
        let in_tracks = tracks.contains(pos);
        if pressed {
            if in_tracks {
                self.pan.press(button, self.sync.offset(), pos);
            }
            return;
        }
        if in_tracks {
            self.pan.release_in_container(button);
        }
        self.pan.release_anywhere(button);
    }

    pub fn pan_drag(&mut self, pointer: Pos2) -> Option<ScrollOutcome> {
        let target = self.pan.drag(pointer, self.bounds())?;
        self.scroll_track_to(target)
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_active()
    }

    pub fn shows_drag_cursor(&self) -> bool {
        self.pan.shows_dragging_cursor()
    }

    pub fn ruler_press(&mut self, local_x: f32, now: f64) -> Option<f64> {
        self.playhead
            .press(local_x, &self.scale, now, &mut self.player)
    }

    pub fn ruler_drag(&mut self, local_x: f32, primary_down: bool) -> Option<f64> {
        self.playhead
            .drag(local_x, primary_down, &self.scale, &mut self.player)
    }

    /// Advance the playhead animation; true while it still needs frames.
    pub fn advance_playhead(&mut self, now: f64) -> bool {
        self.playhead.advance(now, &mut self.player)
    }

    /// Jump straight to `seconds`, dropping any placement animation.
    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            tracing::warn!(seconds, "Rejected seek");
            return;
        }
        let duration = self.scale.duration();
        let seconds = if duration > 0.0 {
            seconds.clamp(0.0, duration)
        } else {
            seconds.max(0.0)
        };
        self.playhead.cancel(&self.scale);
        self.player.move_playhead(seconds);
        self.player.preview_frame(seconds);
        self.playhead.sync_position(self.player.committed(), &self.scale);
    }

    pub fn cancel_playhead(&mut self) -> Option<f64> {
        self.playhead.cancel(&self.scale)
    }

    pub fn label_window(&self) -> LabelWindow {
        LabelWindow::around(self.sync.scroll_left(), self.viewport.x, self.layout.width())
    }

    pub fn visible_labels(&self) -> Vec<TickLabel> {
        self.layout
            .labels_in(self.label_window(), self.settings.frame_rate)
    }
}
