//! Ordered thumbnail strip.
//! Results are written into their sample slot, so left-to-right order never
//! depends on which decode finished first.

use crate::core::progress::Progress;
use crate::decode::decoder::VideoFrame;

/// A decoded thumbnail and the position along the video it shows
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailFrame {
    pub index: usize,
    pub progress: Progress,
    pub frame: VideoFrame,
}

/// Pre-sized, indexed display list. Empty slots render as gaps.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailStrip {
    slots: Vec<Option<ThumbnailFrame>>,
}

impl ThumbnailStrip {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    /// Store a thumbnail in its slot.
    /// Returns false when the index is outside the strip.
    pub fn place(&mut self, thumbnail: ThumbnailFrame) -> bool {
        match self.slots.get_mut(thumbnail.index) {
            Some(slot) => {
                *slot = Some(thumbnail);
                true
            }
            None => false,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<&ThumbnailFrame> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// All slots in sample order, including gaps
    pub fn slots(&self) -> impl Iterator<Item = Option<&ThumbnailFrame>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Decoded thumbnails in sample order
    pub fn frames(&self) -> impl Iterator<Item = &ThumbnailFrame> {
        self.slots.iter().flatten()
    }

    /// Number of decoded thumbnails
    pub fn len(&self) -> usize {
        self.frames().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
