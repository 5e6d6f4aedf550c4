//! Stream metadata extracted when a video is opened.

use crate::core::time::Time;
use crate::decode::geometry::{FrameSize, Rotation};

/// Information about the selected stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub index: usize,
    pub duration: Time,  // Duration in nanoseconds
    pub codec_name: String,
}

/// Video-specific stream information
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStreamInfo {
    pub stream_info: StreamInfo,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub pixel_format: String,
    pub rotation: Rotation,  // Applied to decoded frames before cropping
}

impl VideoStreamInfo {
    pub fn duration(&self) -> Time {
        self.stream_info.duration
    }

    /// Frame size as shown, after the display matrix rotation
    pub fn display_size(&self) -> FrameSize {
        self.rotation.apply_to_size(FrameSize::new(self.width, self.height))
    }
}
