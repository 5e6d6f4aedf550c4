//! Bounded cache of preview frames for smooth scrubbing.
//! Scrubbing back and forth revisits the same timestamps; serving those from
//! memory keeps the preview from re-decoding on every pointer move.

use std::collections::{HashMap, VecDeque};

use crate::core::time::Time;
use crate::decode::decoder::VideoFrame;

/// Frame cache keyed by requested timestamp, evicting oldest insertions first
#[derive(Debug, Clone)]
pub struct FrameCache {
    frames: HashMap<Time, VideoFrame>,
    order: VecDeque<Time>,
    capacity: usize,
}

impl FrameCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn get(&self, timestamp: Time) -> Option<&VideoFrame> {
        self.frames.get(&timestamp)
    }

    /// Store `frame` as the answer for requests at `timestamp`.
    /// A zero-capacity cache stores nothing.
    pub fn insert(&mut self, timestamp: Time, frame: VideoFrame) {
        if self.capacity == 0 {
            return;
        }

        if self.frames.insert(timestamp, frame).is_some() {
            return;
        }
        self.order.push_back(timestamp);

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.frames.remove(&oldest);
            }
        }
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
