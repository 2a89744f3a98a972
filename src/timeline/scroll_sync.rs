//! Scroll mirroring between the track area and its sibling regions.
//!
//! The track area is the only scroll source. Every scroll it reports is
//! mirrored to the subscribed regions: horizontal followers (ruler, progress
//! bar) take the x offset, vertical followers (track controls) take the y
//! offset. An optional host bridge receives normalized scrollbar edges.

use std::collections::BTreeMap;

use egui::Vec2;
use serde::Serialize;

use super::scale::MAX_RENDER_WIDTH;

/// Regions that can subscribe to the shared scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    /// The scroll source; mirrors both axes.
    TrackArea,
    TrackControls,
    Ruler,
    Progress,
}

impl RegionId {
    fn mirror(self, offset: Vec2) -> f32 {
        match self {
            RegionId::TrackControls => offset.y,
            RegionId::TrackArea | RegionId::Ruler | RegionId::Progress => offset.x,
        }
    }
}

/// Normalized scrollbar state handed to an embedding host.
///
/// Serializes as `[left, right, total_width, viewport_width]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "[f32; 4]")]
pub struct ScrollbarReport {
    /// Left visible edge as a fraction of the total width.
    pub left: f32,
    /// Right visible edge as a fraction of the total width.
    pub right: f32,
    pub total_width: f32,
    pub viewport_width: f32,
}

impl ScrollbarReport {
    /// Edges for `offset` within a timeline `timeline_width` wide (capped at the render limit).
    pub fn compute(offset: f32, viewport_width: f32, timeline_width: f32) -> Option<Self> {
        let total_width = timeline_width.min(MAX_RENDER_WIDTH);
        if !total_width.is_finite() || total_width <= 0.0 {
            return None;
        }
        Some(Self {
            left: offset / total_width,
            right: (offset + viewport_width) / total_width,
            total_width,
            viewport_width,
        })
    }
}

impl From<ScrollbarReport> for [f32; 4] {
    fn from(report: ScrollbarReport) -> Self {
        [
            report.left,
            report.right,
            report.total_width,
            report.viewport_width,
        ]
    }
}

/// Receiver for scrollbar changes when the ruler is embedded in a native shell.
pub trait HostBridge {
    fn scrollbar_changed(&mut self, report: ScrollbarReport);
}

/// Host bridge that emits each report as a JSON array on the `host_bridge` log target.
#[derive(Debug, Default)]
pub struct JsonHostBridge;

impl HostBridge for JsonHostBridge {
    fn scrollbar_changed(&mut self, report: ScrollbarReport) {
        match serde_json::to_string(&report) {
            Ok(payload) => tracing::info!(target: "host_bridge", %payload, "ScrollbarChanged"),
            Err(err) => tracing::warn!("Failed to encode scrollbar report: {err}"),
        }
    }
}

/// A scroll reported by the track area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub offset: Vec2,
    pub viewport_width: f32,
    /// Uncapped timeline width (`timeline_width(0)`).
    pub timeline_width: f32,
}

/// What happened to a scroll event after mirroring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollOutcome {
    /// The event was the echo of a programmatic scroll; host forwarding was skipped.
    EchoSuppressed,
    /// Mirrored; the report is present when a host bridge received it.
    Forwarded(Option<ScrollbarReport>),
}

/// Scroll mediator shared by the track area, ruler, progress bar and track controls.
#[derive(Default)]
pub struct ScrollSync {
    offset: Vec2,
    regions: BTreeMap<RegionId, f32>,
    ignore_next_echo: bool,
    host: Option<Box<dyn HostBridge>>,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start mirroring into `region`, seeding it with the current offset.
    pub fn subscribe(&mut self, region: RegionId) {
        let value = region.mirror(self.offset);
        self.regions.insert(region, value);
    }

    pub fn unsubscribe(&mut self, region: RegionId) {
        self.regions.remove(&region);
    }

    pub fn attach_host(&mut self, host: Box<dyn HostBridge>) {
        self.host = Some(host);
    }

    pub fn detach_host(&mut self) -> Option<Box<dyn HostBridge>> {
        self.host.take()
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Mark the next scroll event as the echo of a programmatic scroll.
    pub fn suppress_next_echo(&mut self) {
        self.ignore_next_echo = true;
    }

    pub fn echo_pending(&self) -> bool {
        self.ignore_next_echo
    }

    /// Source offset as last reported by the track area.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Horizontal offset shared by the ruler and progress bar.
    pub fn scroll_left(&self) -> f32 {
        self.offset.x
    }

    /// Offset currently mirrored into `region` along its axis.
    pub fn region_offset(&self, region: RegionId) -> Option<f32> {
        self.regions.get(&region).copied()
    }

    /// Mirror a scroll reported by the track area.
    pub fn on_scroll(&mut self, event: ScrollEvent) -> ScrollOutcome {
        self.offset = event.offset;
        for (region, value) in self.regions.iter_mut() {
            *value = region.mirror(event.offset);
        }

        if self.ignore_next_echo {
            self.ignore_next_echo = false;
            tracing::trace!(offset = event.offset.x, "Skipped host forwarding for scroll echo");
            return ScrollOutcome::EchoSuppressed;
        }

        let Some(host) = self.host.as_mut() else {
            return ScrollOutcome::Forwarded(None);
        };
        let report = ScrollbarReport::compute(
            event.offset.x,
            event.viewport_width,
            event.timeline_width,
        );
        if let Some(report) = report {
            host.scrollbar_changed(report);
        }
        ScrollOutcome::Forwarded(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<ScrollbarReport>>>);

    impl HostBridge for Recorder {
        fn scrollbar_changed(&mut self, report: ScrollbarReport) {
            self.0.borrow_mut().push(report);
        }
    }

    fn sync_with_all_regions() -> ScrollSync {
        let mut sync = ScrollSync::new();
        for region in [
            RegionId::TrackArea,
            RegionId::TrackControls,
            RegionId::Ruler,
            RegionId::Progress,
        ] {
            sync.subscribe(region);
        }
        sync
    }

    fn event(x: f32, y: f32) -> ScrollEvent {
        ScrollEvent {
            offset: Vec2::new(x, y),
            viewport_width: 800.0,
            timeline_width: 5000.0,
        }
    }

    #[test]
    fn mirrors_offsets_to_every_region() {
        let mut sync = sync_with_all_regions();
        for x in [0.0, 17.5, 300.0, 4200.0] {
            sync.on_scroll(event(x, 40.0));
            assert_eq!(sync.region_offset(RegionId::Ruler), Some(x));
            assert_eq!(sync.region_offset(RegionId::Progress), Some(x));
            assert_eq!(sync.region_offset(RegionId::TrackArea), Some(x));
            assert_eq!(sync.region_offset(RegionId::TrackControls), Some(40.0));
            assert_eq!(sync.scroll_left(), x);
        }
    }

    #[test]
    fn unsubscribed_region_reports_nothing() {
        let mut sync = ScrollSync::new();
        sync.subscribe(RegionId::Ruler);
        sync.on_scroll(event(90.0, 0.0));
        assert_eq!(sync.region_offset(RegionId::Progress), None);
        sync.unsubscribe(RegionId::Ruler);
        assert_eq!(sync.region_offset(RegionId::Ruler), None);
    }

    #[test]
    fn reports_normalized_edges_to_host() {
        let recorder = Recorder::default();
        let mut sync = sync_with_all_regions();
        sync.attach_host(Box::new(recorder.clone()));
        let outcome = sync.on_scroll(event(300.0, 0.0));
        let reports = recorder.0.borrow();
        assert_eq!(reports.len(), 1);
        let report = reports[0];
        assert!((report.left - 0.06).abs() < 1e-6);
        assert!((report.right - 0.22).abs() < 1e-6);
        assert_eq!(report.total_width, 5000.0);
        assert_eq!(report.viewport_width, 800.0);
        assert_eq!(outcome, ScrollOutcome::Forwarded(Some(report)));
    }

    #[test]
    fn echo_flag_is_consumed_once_and_skips_host() {
        let recorder = Recorder::default();
        let mut sync = sync_with_all_regions();
        sync.attach_host(Box::new(recorder.clone()));
        sync.suppress_next_echo();
        assert_eq!(sync.on_scroll(event(120.0, 0.0)), ScrollOutcome::EchoSuppressed);
        assert_eq!(sync.region_offset(RegionId::Ruler), Some(120.0));
        assert!(recorder.0.borrow().is_empty());
        assert!(!sync.echo_pending());

        sync.on_scroll(event(140.0, 0.0));
        assert_eq!(recorder.0.borrow().len(), 1);
    }

    #[test]
    fn no_host_means_no_report() {
        let mut sync = sync_with_all_regions();
        assert_eq!(sync.on_scroll(event(10.0, 0.0)), ScrollOutcome::Forwarded(None));
    }

    #[test]
    fn total_width_is_capped_at_render_limit() {
        let report = ScrollbarReport::compute(0.0, 1000.0, 100_000.0).unwrap();
        assert_eq!(report.total_width, MAX_RENDER_WIDTH);
        assert!(ScrollbarReport::compute(0.0, 1000.0, 0.0).is_none());
    }

    #[test]
    fn report_serializes_as_array() {
        let report = ScrollbarReport {
            left: 0.25,
            right: 0.5,
            total_width: 4000.0,
            viewport_width: 1000.0,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, "[0.25,0.5,4000.0,1000.0]");
    }
}
