//! Normalized playback position.

use crate::core::time::{Time, ZERO};

/// Position within the asset in [0, 1], 0 = first frame, 1 = end.
/// Always clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    /// Clamp `value` into [0, 1]. NaN maps to the start.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Timestamp this progress refers to within an asset of `duration`.
    /// An unloaded asset (duration <= 0) always maps to time zero.
    pub fn to_time(self, duration: Time) -> Time {
        progress_to_time(self, duration)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

/// `progress × duration`, rounded to the nearest nanosecond
pub fn progress_to_time(progress: Progress, duration: Time) -> Time {
    if duration <= ZERO {
        return ZERO;
    }
    (progress.value() * duration as f64).round() as Time
}
