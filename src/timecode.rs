//! Seconds-to-timecode conversion for ruler labels.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rational project frame rate, e.g. `30000/1001`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub num: u32,
    pub den: u32,
}

/// Rejected frame rate components.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameRateError {
    #[error("Frame rate numerator must be greater than zero")]
    ZeroNumerator,
    #[error("Frame rate denominator must be greater than zero")]
    ZeroDenominator,
}

impl FrameRate {
    /// 30 frames per second.
    pub const DEFAULT: FrameRate = FrameRate { num: 30, den: 1 };

    pub fn new(num: u32, den: u32) -> Result<Self, FrameRateError> {
        let rate = Self { num, den };
        rate.validate()?;
        Ok(rate)
    }

    pub fn validate(&self) -> Result<(), FrameRateError> {
        if self.num == 0 {
            return Err(FrameRateError::ZeroNumerator);
        }
        if self.den == 0 {
            return Err(FrameRateError::ZeroDenominator);
        }
        Ok(())
    }

    /// Frames per second as a float; falls back to the default rate when invalid.
    pub fn fps(&self) -> f64 {
        match self.validate() {
            Ok(()) => self.num as f64 / self.den as f64,
            Err(_) => Self::DEFAULT.fps(),
        }
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Broken-down timecode for a timeline position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timecode {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// 1-based frame number within the current second.
    pub frame: u32,
    pub millis: u32,
}

impl Timecode {
    /// Break `seconds` down using `rate`. Negative or non-finite input reads as zero.
    pub fn from_seconds(seconds: f64, rate: FrameRate) -> Self {
        // Snap to microseconds so 14.999999999 from pixel math reads as 15.
        let seconds = if seconds.is_finite() {
            (seconds.max(0.0) * 1_000_000.0).round() / 1_000_000.0
        } else {
            0.0
        };
        let whole = seconds.floor();
        let fraction = seconds - whole;
        let whole = whole as u64;
        let fps = rate.fps();
        let frames_per_second = fps.ceil().max(1.0) as u32;
        let frame = ((fraction * fps).floor() as u32 + 1).min(frames_per_second);
        Self {
            hours: (whole / 3600) as u32,
            minutes: ((whole % 3600) / 60) as u32,
            seconds: (whole % 60) as u32,
            frame,
            millis: ((fraction * 1000.0).round() as u32).min(999),
        }
    }

    /// `HH:MM:SS`, the form drawn above long ruler ticks.
    pub fn hms(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frame
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_components() {
        assert_eq!(FrameRate::new(0, 1), Err(FrameRateError::ZeroNumerator));
        assert_eq!(FrameRate::new(30, 0), Err(FrameRateError::ZeroDenominator));
        assert!(FrameRate::new(30000, 1001).is_ok());
    }

    #[test]
    fn invalid_rate_falls_back_to_default_fps() {
        let broken = FrameRate { num: 24, den: 0 };
        assert_eq!(broken.fps(), 30.0);
    }

    #[test]
    fn splits_hours_minutes_seconds() {
        let code = Timecode::from_seconds(3661.5, FrameRate::DEFAULT);
        assert_eq!(code.hours, 1);
        assert_eq!(code.minutes, 1);
        assert_eq!(code.seconds, 1);
        assert_eq!(code.millis, 500);
        assert_eq!(code.frame, 16);
        assert_eq!(code.hms(), "01:01:01");
        assert_eq!(code.to_string(), "01:01:01:16");
    }

    #[test]
    fn whole_second_is_first_frame() {
        let code = Timecode::from_seconds(10.0, FrameRate::new(24, 1).unwrap());
        assert_eq!(code.frame, 1);
        assert_eq!(code.hms(), "00:00:10");
    }

    #[test]
    fn ntsc_rate_never_exceeds_frame_count() {
        let rate = FrameRate::new(30000, 1001).unwrap();
        let code = Timecode::from_seconds(0.9999, rate);
        assert!(code.frame <= 30);
        assert_eq!(code.millis, 999);
    }

    #[test]
    fn pixel_rounding_error_does_not_drop_a_second() {
        let code = Timecode::from_seconds(14.999_999_999_9, FrameRate::DEFAULT);
        assert_eq!(code.hms(), "00:00:15");
        assert_eq!(code.frame, 1);
    }

    #[test]
    fn negative_and_nan_read_as_zero() {
        assert_eq!(Timecode::from_seconds(-4.0, FrameRate::DEFAULT).hms(), "00:00:00");
        assert_eq!(Timecode::from_seconds(f64::NAN, FrameRate::DEFAULT).hms(), "00:00:00");
    }
}
