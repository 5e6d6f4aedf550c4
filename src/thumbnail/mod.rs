pub mod generator;
pub mod sampling;
pub mod strip;

pub use generator::{ThumbnailEvent, ThumbnailGenerator, ThumbnailJob};
pub use sampling::{sample_progress, sample_times, samples, Sample, DEFAULT_THUMBNAIL_COUNT};
pub use strip::{ThumbnailFrame, ThumbnailStrip};
