//! Deterministic in-memory frame source for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::core::time::{self, Time};
use crate::decode::decoder::{DecodeError, FrameSource, VideoFrame};
use crate::decode::geometry::FrameSize;

/// Solid-colour frames whose red channel is the requested whole second
#[derive(Debug, Default)]
pub struct FakeSource {
    failures: HashSet<Time>,
    delays: HashMap<Time, Duration>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(mut self, at: Time) -> Self {
        self.failures.insert(at);
        self
    }

    pub fn delayed_at(mut self, at: Time, delay: Duration) -> Self {
        self.delays.insert(at, delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shade_for(at: Time) -> u8 {
        (time::to_seconds(at) as u64 % 256) as u8
    }
}

impl FrameSource for FakeSource {
    fn decode_frame(&self, at: Time, size: FrameSize) -> Result<VideoFrame, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&at) {
            std::thread::sleep(*delay);
        }
        if self.failures.contains(&at) {
            return Err(DecodeError::NoFrame(at));
        }

        let pixel = [Self::shade_for(at), 0, 0, 255];
        Ok(VideoFrame {
            data: pixel.repeat(size.width as usize * size.height as usize),
            width: size.width,
            height: size.height,
            timestamp: at,
        })
    }
}
