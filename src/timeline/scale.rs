//! Conversion between timeline seconds and ruler pixels.

/// Widest surface the ruler and track area will lay out, in pixels.
pub const MAX_RENDER_WIDTH: f32 = 32767.0;
/// Pixel width of one long-tick interval.
pub const DEFAULT_TICK_PIXELS: f32 = 100.0;
/// Seconds covered by one long-tick interval at the default zoom.
pub const DEFAULT_SCALE: f64 = 15.0;

/// Zoom state of the timeline.
///
/// `scale` is the number of seconds covered by `tick_pixels` pixels, so the
/// pixels-per-second ratio is `tick_pixels / scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    scale: f64,
    tick_pixels: f32,
    duration: f64,
}

impl TimeScale {
    pub fn new(scale: f64, tick_pixels: f32, duration: f64) -> Self {
        Self {
            scale,
            tick_pixels,
            duration: sanitize_duration(duration),
        }
    }

    /// Build a scale that maps exactly `pixels_per_second` pixels to one second.
    pub fn from_pixels_per_second(pixels_per_second: f64, tick_pixels: f32, duration: f64) -> Self {
        let scale = if pixels_per_second > 0.0 {
            tick_pixels as f64 / pixels_per_second
        } else {
            0.0
        };
        Self::new(scale, tick_pixels, duration)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn tick_pixels(&self) -> f32 {
        self.tick_pixels
    }

    /// Project duration in seconds (never negative).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = sanitize_duration(duration);
    }

    /// Distance between adjacent ruler ticks; every second tick is a long one.
    pub fn tick_spacing(&self) -> f32 {
        self.tick_pixels / 2.0
    }

    /// Pixels per second, or `None` when the zoom is zero, negative or not finite.
    pub fn pixels_per_second(&self) -> Option<f64> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return None;
        }
        if !self.tick_pixels.is_finite() || self.tick_pixels <= 0.0 {
            return None;
        }
        let pps = self.tick_pixels as f64 / self.scale;
        (pps.is_finite() && pps > 0.0).then_some(pps)
    }

    /// Timeline seconds under a ruler-local x coordinate.
    ///
    /// The result is clamped to `[0, duration]` (upper bound only applies once a
    /// duration is known). Returns `None` when the scale cannot map pixels.
    pub fn seconds_at(&self, local_x: f32) -> Option<f64> {
        let pps = self.pixels_per_second()?;
        if !local_x.is_finite() {
            return None;
        }
        let seconds = (local_x as f64 / pps).max(0.0);
        if self.duration > 0.0 {
            Some(seconds.min(self.duration))
        } else {
            Some(seconds)
        }
    }

    /// Ruler-local x coordinate of `seconds`; zero when the scale is unusable.
    pub fn pixel_at(&self, seconds: f64) -> f32 {
        match self.pixels_per_second() {
            Some(pps) if seconds.is_finite() => (seconds.max(0.0) * pps) as f32,
            _ => 0.0,
        }
    }

    /// Full timeline width, never narrower than `min_width`.
    pub fn timeline_width(&self, min_width: f32) -> f32 {
        let content = self
            .pixels_per_second()
            .map(|pps| (self.duration * pps) as f32)
            .unwrap_or(0.0);
        content.max(min_width.max(0.0))
    }

    /// Timeline width capped at [`MAX_RENDER_WIDTH`].
    pub fn render_width(&self, min_width: f32) -> f32 {
        self.timeline_width(min_width).min(MAX_RENDER_WIDTH)
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE, DEFAULT_TICK_PIXELS, 0.0)
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() {
        duration.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn pixels_per_second_follows_tick_pixels_over_scale() {
        let scale = TimeScale::new(10.0, 100.0, 60.0);
        assert!(approx(scale.pixels_per_second().unwrap(), 10.0));
        assert_eq!(scale.tick_spacing(), 50.0);
    }

    #[test]
    fn click_position_divides_by_pixels_per_second() {
        let scale = TimeScale::from_pixels_per_second(8.0, 100.0, 600.0);
        let seconds = scale.seconds_at(200.0).unwrap();
        assert!(approx(seconds, 25.0));
    }

    #[test]
    fn zero_or_nan_scale_yields_no_time() {
        assert!(TimeScale::new(0.0, 100.0, 10.0).seconds_at(50.0).is_none());
        assert!(TimeScale::new(f64::NAN, 100.0, 10.0).seconds_at(50.0).is_none());
        assert!(TimeScale::new(5.0, 0.0, 10.0).seconds_at(50.0).is_none());
        assert_eq!(TimeScale::new(0.0, 100.0, 10.0).pixel_at(3.0), 0.0);
    }

    #[test]
    fn seconds_are_clamped_to_timeline_bounds() {
        let scale = TimeScale::new(10.0, 100.0, 30.0);
        assert_eq!(scale.seconds_at(-40.0), Some(0.0));
        assert_eq!(scale.seconds_at(10_000.0), Some(30.0));
        let open_ended = TimeScale::new(10.0, 100.0, 0.0);
        assert!(approx(open_ended.seconds_at(10_000.0).unwrap(), 1000.0));
    }

    #[test]
    fn timeline_width_respects_floor_and_render_cap() {
        let short = TimeScale::new(10.0, 100.0, 20.0);
        assert_eq!(short.timeline_width(1024.0), 1024.0);
        assert_eq!(short.timeline_width(0.0), 200.0);

        let long = TimeScale::new(1.0, 100.0, 3600.0);
        assert_eq!(long.timeline_width(0.0), 360_000.0);
        assert_eq!(long.render_width(1024.0), MAX_RENDER_WIDTH);
    }

    #[test]
    fn negative_duration_is_treated_as_empty() {
        let scale = TimeScale::new(10.0, 100.0, -5.0);
        assert_eq!(scale.duration(), 0.0);
    }
}
