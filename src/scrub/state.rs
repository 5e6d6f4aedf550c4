//! Scrub handle state.

use crate::core::progress::Progress;

/// Drag gesture state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    /// No active pointer; the handle stays where it was released
    #[default]
    Idle,
    /// Pointer held down over the strip
    Dragging {
        pointer_x: f32,  // Last pointer position in strip-local points
    },
}

impl DragPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging { .. })
    }
}

/// Committed handle position.
/// `offset` is always within `[0, travel]` and `progress == offset / travel`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrubState {
    pub progress: Progress,
    pub offset: f32,
}

/// Layout the handle moves within, in logical points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    pub strip_width: f32,
    pub handle_width: f32,
}

impl StripMetrics {
    pub fn new(strip_width: f32, handle_width: f32) -> Self {
        Self {
            strip_width,
            handle_width,
        }
    }

    /// Distance the handle's left edge can move: `strip_width - handle_width`,
    /// or zero when the handle does not fit.
    pub fn travel(&self) -> f32 {
        let travel = self.strip_width - self.handle_width;
        if travel.is_finite() && travel > 0.0 {
            travel
        } else {
            0.0
        }
    }
}

impl Default for StripMetrics {
    fn default() -> Self {
        Self::new(0.0, 35.0)
    }
}
