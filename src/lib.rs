//! Video cover picker.
//!
//! Samples an evenly spaced thumbnail strip from a video and lets the user
//! scrub a handle over it; the preview shows the frame under the handle.

pub mod config;
pub mod core;
pub mod decode;
pub mod preview;
pub mod screen;
pub mod scrub;
pub mod thumbnail;
pub mod ui;

pub use config::PickerSettings;
pub use screen::{CoverScreen, ScreenCommand};
