//! Screen settings.

use std::path::PathBuf;

use crate::decode::geometry::FrameSize;
use crate::scrub::state::StripMetrics;
use crate::thumbnail::sampling::DEFAULT_THUMBNAIL_COUNT;

/// Layout and decode settings for the cover picker
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSettings {
    pub video_path: PathBuf,
    pub thumbnail_count: usize,
    pub strip_height: f32,    // logical points
    pub handle_width: f32,    // logical points
    pub preview_size: FrameSize,  // logical points
    pub cache_capacity: usize,  // preview frames kept for re-scrubbing
}

impl PickerSettings {
    pub fn with_video_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.video_path = path.into();
        self
    }

    /// Handle metrics for a strip laid out `strip_width` points wide
    pub fn strip_metrics(&self, strip_width: f32) -> StripMetrics {
        StripMetrics::new(strip_width, self.handle_width)
    }

    /// Decode size in pixels of one thumbnail slot in a strip `strip_width`
    /// points wide
    pub fn thumbnail_size(&self, strip_width: f32, pixels_per_point: f32) -> FrameSize {
        let count = self.thumbnail_count.max(1) as f32;
        let scale = display_scale(pixels_per_point);
        FrameSize::from_points(strip_width / count * scale, self.strip_height * scale)
    }

    /// Decode size in pixels of the cover preview
    pub fn preview_pixels(&self, pixels_per_point: f32) -> FrameSize {
        let scale = display_scale(pixels_per_point);
        FrameSize::from_points(
            self.preview_size.width as f32 * scale,
            self.preview_size.height as f32 * scale,
        )
    }
}

fn display_scale(pixels_per_point: f32) -> f32 {
    if pixels_per_point.is_finite() && pixels_per_point > 0.0 {
        pixels_per_point
    } else {
        1.0
    }
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            video_path: PathBuf::from("IMG_2730.MOV"),
            thumbnail_count: DEFAULT_THUMBNAIL_COUNT,
            strip_height: 50.0,
            handle_width: 35.0,
            preview_size: FrameSize::new(200, 300),
            cache_capacity: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PickerSettings::default();
        assert_eq!(settings.thumbnail_count, 10);
        assert_eq!(settings.preview_size, FrameSize::new(200, 300));
        assert_eq!(settings.strip_metrics(300.0).travel(), 265.0);
    }

    #[test]
    fn test_thumbnail_size_splits_strip() {
        let settings = PickerSettings::default();
        assert_eq!(settings.thumbnail_size(345.0, 1.0), FrameSize::new(35, 50));

        let none = PickerSettings {
            thumbnail_count: 0,
            ..PickerSettings::default()
        };
        assert_eq!(none.thumbnail_size(100.0, 1.0), FrameSize::new(100, 50));
    }

    #[test]
    fn test_sizes_scale_with_pixels_per_point() {
        let settings = PickerSettings::default();
        assert_eq!(settings.thumbnail_size(345.0, 2.0), FrameSize::new(69, 100));
        assert_eq!(settings.preview_pixels(3.0), FrameSize::new(600, 900));
        assert_eq!(settings.preview_pixels(1.0), settings.preview_size);

        // Nonsense scale factors fall back to 1:1
        assert_eq!(settings.preview_pixels(0.0), settings.preview_size);
        assert_eq!(settings.thumbnail_size(345.0, f32::NAN), FrameSize::new(35, 50));
    }
}
