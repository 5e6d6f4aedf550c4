//! A loaded video file.

use std::path::{Path, PathBuf};

use crate::core::time::Time;
use crate::decode::decoder::{DecodeError, FfmpegDecoder};
use crate::decode::stream_info::VideoStreamInfo;

/// Handle to a local video whose metadata has been read.
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAsset {
    path: PathBuf,
    info: VideoStreamInfo,
}

impl VideoAsset {
    /// Probe `path` and read its video stream metadata.
    /// Fails if the file is missing, unreadable or has no video stream.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let decoder = FfmpegDecoder::open(path.as_ref())?;
        Ok(Self::from_info(path, decoder.info().clone()))
    }

    /// Wrap already known metadata without touching the file
    pub fn from_info<P: AsRef<Path>>(path: P, info: VideoStreamInfo) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            info,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total duration in nanoseconds
    pub fn duration(&self) -> Time {
        self.info.duration()
    }

    pub fn info(&self) -> &VideoStreamInfo {
        &self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result = VideoAsset::load("/definitely/not/here.mov");
        assert!(matches!(result, Err(DecodeError::FileNotFound(_))));
    }
}
