pub mod asset;
pub mod decoder;
pub mod frame_cache;
pub mod geometry;
pub mod stream_info;

#[cfg(test)]
pub(crate) mod fake;

pub use asset::VideoAsset;
pub use decoder::{DecodeError, FfmpegDecoder, FfmpegSource, FrameSource, SharedDecoder, VideoFrame};
pub use frame_cache::FrameCache;
pub use geometry::{fill_crop, CropRect, FrameSize, Rotation};
pub use stream_info::{StreamInfo, VideoStreamInfo};
