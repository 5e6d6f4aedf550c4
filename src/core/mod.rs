//! Core value types shared by the decoder, strip and scrubber.
//!
//! All time values are in nanoseconds (i64); positions along the video are
//! expressed as a clamped [`Progress`].

pub mod progress;
pub mod time;

pub use progress::Progress;
pub use time::{Time, ZERO};
