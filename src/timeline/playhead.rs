//! Playhead placement and scrubbing on the ruler.
//!
//! A press animates the playhead marker to the clicked spot and previews that
//! frame right away; the authoritative position is committed only when the
//! animation settles. Dragging with the primary button scrubs directly, but
//! not while a placement animation is still running.

use std::f64::consts::PI;
use std::time::Duration;

use super::scale::TimeScale;

/// Default length of the click-to-place animation.
pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(200);

/// Commands the ruler issues to the player that owns the real playhead.
pub trait PlayheadCommands {
    /// Commit the playhead position.
    fn move_playhead(&mut self, seconds: f64);
    /// Show the frame at `seconds` without moving the committed playhead.
    fn preview_frame(&mut self, seconds: f64);
}

/// Visual state of the playhead marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayheadMotion {
    Settled,
    Animating {
        from_x: f32,
        to_x: f32,
        target_seconds: f64,
        /// Clock time (seconds) the animation started at.
        started_at: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Playhead {
    seconds: f64,
    visual_x: f32,
    motion: PlayheadMotion,
    animation: Duration,
}

impl Playhead {
    pub fn new(animation: Duration) -> Self {
        Self {
            seconds: 0.0,
            visual_x: 0.0,
            motion: PlayheadMotion::Settled,
            animation,
        }
    }

    /// Committed playhead position in seconds.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Ruler-local x of the drawn marker.
    pub fn visual_x(&self) -> f32 {
        self.visual_x
    }

    pub fn motion(&self) -> PlayheadMotion {
        self.motion
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.motion, PlayheadMotion::Animating { .. })
    }

    /// Click on the ruler at `local_x`: preview immediately, then animate the marker.
    ///
    /// A press during an in-flight animation retargets it from the marker's
    /// current position. Returns the target time, or `None` when the scale
    /// cannot map pixels to time.
    pub fn press(
        &mut self,
        local_x: f32,
        scale: &TimeScale,
        now: f64,
        commands: &mut impl PlayheadCommands,
    ) -> Option<f64> {
        let Some(target_seconds) = scale.seconds_at(local_x) else {
            tracing::warn!(local_x, scale = scale.scale(), "Ignoring ruler press: unusable time scale");
            return None;
        };
        commands.preview_frame(target_seconds);

        if self.is_animating() {
            // Settle first so an animation that already ran out still commits.
            let still_running = self.advance(now, commands);
            tracing::debug!(target_seconds, still_running, "Retargeting playhead animation");
        }
        self.motion = PlayheadMotion::Animating {
            from_x: self.visual_x,
            to_x: scale.pixel_at(target_seconds),
            target_seconds,
            started_at: now,
        };
        self.advance(now, commands);
        Some(target_seconds)
    }

    /// Step the animation to `now`, committing the target once it completes.
    ///
    /// Returns true while the animation is still running.
    pub fn advance(&mut self, now: f64, commands: &mut impl PlayheadCommands) -> bool {
        let Some(target_seconds) = self.step(now) else {
            return self.is_animating();
        };
        self.seconds = target_seconds;
        commands.move_playhead(target_seconds);
        tracing::debug!(seconds = target_seconds, "Playhead settled");
        false
    }

    /// Scrub to `local_x` while the primary button is held.
    pub fn drag(
        &mut self,
        local_x: f32,
        primary_down: bool,
        scale: &TimeScale,
        commands: &mut impl PlayheadCommands,
    ) -> Option<f64> {
        if !primary_down || self.is_animating() {
            return None;
        }
        let seconds = scale.seconds_at(local_x)?;
        self.seconds = seconds;
        self.visual_x = scale.pixel_at(seconds);
        commands.move_playhead(seconds);
        commands.preview_frame(seconds);
        Some(seconds)
    }

    /// Abandon an in-flight animation, snapping the marker back to the committed time.
    pub fn cancel(&mut self, scale: &TimeScale) -> Option<f64> {
        let PlayheadMotion::Animating { target_seconds, .. } = self.motion else {
            return None;
        };
        self.motion = PlayheadMotion::Settled;
        self.visual_x = scale.pixel_at(self.seconds);
        tracing::debug!(target_seconds, "Playhead animation cancelled");
        Some(target_seconds)
    }

    /// Follow a position reported by the player. Ignored while animating.
    pub fn sync_position(&mut self, seconds: f64, scale: &TimeScale) {
        if self.is_animating() || !seconds.is_finite() {
            return;
        }
        self.seconds = seconds.max(0.0);
        self.visual_x = scale.pixel_at(self.seconds);
    }

    /// Recompute the marker position after a zoom change.
    pub fn rescale(&mut self, scale: &TimeScale) {
        if let PlayheadMotion::Animating {
            target_seconds,
            to_x,
            ..
        } = &mut self.motion
        {
            *to_x = scale.pixel_at(*target_seconds);
        } else {
            self.visual_x = scale.pixel_at(self.seconds);
        }
    }

    /// Move the marker along the animation curve. Returns the target time once finished.
    fn step(&mut self, now: f64) -> Option<f64> {
        let PlayheadMotion::Animating {
            from_x,
            to_x,
            target_seconds,
            started_at,
        } = self.motion
        else {
            return None;
        };
        let length = self.animation.as_secs_f64();
        let progress = if length <= 0.0 {
            1.0
        } else {
            ((now - started_at) / length).clamp(0.0, 1.0)
        };
        if progress >= 1.0 {
            self.visual_x = to_x;
            self.motion = PlayheadMotion::Settled;
            return Some(target_seconds);
        }
        let eased = swing(progress) as f32;
        self.visual_x = from_x + (to_x - from_x) * eased;
        None
    }
}

impl Default for Playhead {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION)
    }
}

/// Ease-in-out curve: slow start, slow finish.
fn swing(progress: f64) -> f64 {
    0.5 - (progress * PI).cos() / 2.0
}
