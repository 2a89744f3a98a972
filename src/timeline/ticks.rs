//! Ruler tick layout.
//!
//! Ticks sit at a fixed pixel spacing across the whole renderable width;
//! even-indexed ticks are long and carry a timecode label. Labels are only
//! materialized for a window around the visible region so text layout cost
//! stays bounded on long timelines.

use std::ops::Range;

use super::scale::{MAX_RENDER_WIDTH, TimeScale};
use crate::timecode::{FrameRate, Timecode};

/// Closest two ticks may sit; narrower requests are widened to this.
pub const MIN_TICK_SPACING: f32 = 5.0;

/// A single ruler tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub index: usize,
    /// Ruler-local x position in pixels.
    pub x: f32,
    /// Timeline seconds at this tick.
    pub seconds: f64,
    pub long: bool,
}

/// Text drawn above a long tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    pub index: usize,
    pub x: f32,
    pub text: String,
}

/// Ruler-local pixel span in which labels are produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelWindow {
    pub start: f32,
    pub end: f32,
}

impl LabelWindow {
    /// One viewport before and one viewport after the visible region.
    pub fn around(scroll_offset: f32, viewport_width: f32, total_width: f32) -> Self {
        let viewport = viewport_width.max(0.0);
        let start = (scroll_offset - viewport).max(0.0);
        let end = (scroll_offset + viewport * 2.0).min(total_width.max(0.0));
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x <= self.end
    }
}

/// Precomputed ticks for one zoom/duration state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickLayout {
    spacing: f32,
    width: f32,
    ticks: Vec<Tick>,
}

impl TickLayout {
    /// Lay out ticks for `scale`, covering its render width with `min_width` as the floor.
    pub fn build(scale: &TimeScale, min_width: f32) -> Self {
        Self::with_spacing(
            scale.render_width(min_width),
            scale.tick_spacing(),
            scale.pixels_per_second(),
        )
    }

    /// Lay out `ceil(width / spacing)` ticks.
    ///
    /// `width` is capped at [`MAX_RENDER_WIDTH`] and `spacing` raised to
    /// [`MIN_TICK_SPACING`], which bounds the tick count.
    pub fn with_spacing(width: f32, spacing: f32, pixels_per_second: Option<f64>) -> Self {
        if !(width.is_finite() && spacing.is_finite()) || width <= 0.0 || spacing <= 0.0 {
            return Self {
                spacing: spacing.max(0.0),
                width: width.max(0.0),
                ticks: Vec::new(),
            };
        }
        let width = width.min(MAX_RENDER_WIDTH);
        let spacing = spacing.max(MIN_TICK_SPACING);
        let count = (width / spacing).ceil() as usize;
        let ticks = (0..count)
            .map(|index| {
                let x = index as f32 * spacing;
                Tick {
                    index,
                    x,
                    seconds: pixels_per_second
                        .map(|pps| x as f64 / pps)
                        .unwrap_or(0.0),
                    long: index % 2 == 0,
                }
            })
            .collect();
        Self {
            spacing,
            width,
            ticks,
        }
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Ticks whose x falls inside `span`, found by index arithmetic.
    pub fn ticks_in(&self, span: Range<f32>) -> &[Tick] {
        if self.ticks.is_empty() || self.spacing <= 0.0 || span.end < span.start {
            return &[];
        }
        let first = (span.start.max(0.0) / self.spacing).ceil() as usize;
        let last = (span.end.max(0.0) / self.spacing).floor() as usize;
        let first = first.min(self.ticks.len());
        let end = (last + 1).min(self.ticks.len());
        if first >= end {
            return &[];
        }
        &self.ticks[first..end]
    }

    /// Labels for the long ticks inside `window`.
    pub fn labels_in(&self, window: LabelWindow, rate: FrameRate) -> Vec<TickLabel> {
        self.ticks_in(window.start..window.end)
            .iter()
            .filter(|tick| tick.long)
            .map(|tick| TickLabel {
                index: tick.index,
                x: tick.x,
                text: Timecode::from_seconds(tick.seconds, rate).hms(),
            })
            .collect()
    }
}
