//! Seek-capable preview of a single still frame.

use std::sync::Arc;

use tracing::warn;

use crate::core::progress::Progress;
use crate::core::time::{self, Time};
use crate::decode::decoder::{FrameSource, VideoFrame};
use crate::decode::frame_cache::FrameCache;
use crate::decode::geometry::FrameSize;

/// Shows the frame at the scrub position. Every seek is synchronous; there
/// is no continuous playback.
pub struct PreviewSurface {
    source: Arc<dyn FrameSource>,
    size: FrameSize,
    cache: FrameCache,
    current: Option<VideoFrame>,
    current_at: Option<Time>,
    revision: u64,
}

impl PreviewSurface {
    pub fn new(source: Arc<dyn FrameSource>, size: FrameSize, cache_capacity: usize) -> Self {
        Self {
            source,
            size,
            cache: FrameCache::new(cache_capacity),
            current: None,
            current_at: None,
            revision: 0,
        }
    }

    /// Seek to `progress × duration`
    pub fn seek(&mut self, progress: Progress, duration: Time) -> Option<&VideoFrame> {
        self.seek_to(progress.to_time(duration))
    }

    /// Show the frame nearest to `at`. Seeking to the timestamp already on
    /// screen does nothing. On a decode failure the previous frame stays.
    pub fn seek_to(&mut self, at: Time) -> Option<&VideoFrame> {
        if self.current_at == Some(at) {
            return self.current.as_ref();
        }

        let frame = match self.cache.get(at) {
            Some(frame) => frame.clone(),
            None => match self.source.decode_frame(at, self.size) {
                Ok(frame) => {
                    self.cache.insert(at, frame.clone());
                    frame
                }
                Err(e) => {
                    warn!(at = %time::format_time(at), "preview decode failed: {}", e);
                    return self.current.as_ref();
                }
            },
        };

        self.current = Some(frame);
        self.current_at = Some(at);
        self.revision += 1;
        self.current.as_ref()
    }

    pub fn frame(&self) -> Option<&VideoFrame> {
        self.current.as_ref()
    }

    /// Timestamp of the last successful seek
    pub fn position(&self) -> Option<Time> {
        self.current_at
    }

    /// Bumped whenever the displayed frame changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Change the render size. Cached frames are dropped; the current frame
    /// stays on screen until the next seek.
    pub fn set_size(&mut self, size: FrameSize) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.cache.clear();
        self.current_at = None;
    }
}
