//! Deferred ruler rebuilds.
//!
//! Changes to zoom, tick size, marker count or duration are observed while
//! handling input, but the tick layout is only rebuilt at the start of the
//! next frame, once the surrounding panels have been laid out.

use super::scale::TimeScale;

/// Inputs the tick layout depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutKey {
    pub scale: f64,
    pub tick_pixels: f32,
    pub markers: usize,
    pub duration: f64,
}

impl LayoutKey {
    pub fn new(scale: &TimeScale, markers: usize) -> Self {
        Self {
            scale: scale.scale(),
            tick_pixels: scale.tick_pixels(),
            markers,
            duration: scale.duration(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DeferredRelayout {
    last: Option<LayoutKey>,
    pending: bool,
}

impl DeferredRelayout {
    /// Record the current key; schedules a rebuild when it differs from the last one.
    pub fn observe(&mut self, key: LayoutKey) -> bool {
        if self.last == Some(key) {
            return false;
        }
        tracing::trace!(?key, "Ruler layout scheduled");
        self.last = Some(key);
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Claim the scheduled rebuild, if any.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
