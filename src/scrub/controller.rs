//! Drag-to-seek mapping for the scrub handle.

use tracing::trace;

use crate::core::progress::Progress;
use crate::scrub::state::{DragPhase, ScrubState, StripMetrics};

/// Clamp a handle offset (pointer already shifted by half the handle) into
/// `[0, strip_width - handle_width]`. Non-finite input clamps to the start.
pub fn clamp_offset(raw: f32, metrics: &StripMetrics) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, metrics.travel())
}

/// `offset / (strip_width - handle_width)`; a strip with no travel is
/// always at the start.
pub fn offset_to_progress(offset: f32, metrics: &StripMetrics) -> Progress {
    let travel = metrics.travel();
    if travel <= 0.0 {
        return Progress::START;
    }
    Progress::new(clamp_offset(offset, metrics) as f64 / travel as f64)
}

pub fn progress_to_offset(progress: Progress, metrics: &StripMetrics) -> f32 {
    (progress.value() * metrics.travel() as f64) as f32
}

/// Tracks the handle over the strip and converts pointer moves into progress
#[derive(Debug, Clone, Default)]
pub struct ScrubController {
    metrics: StripMetrics,
    state: ScrubState,
    phase: DragPhase,
}

impl ScrubController {
    pub fn new(metrics: StripMetrics) -> Self {
        Self {
            metrics,
            state: ScrubState::default(),
            phase: DragPhase::Idle,
        }
    }

    pub fn metrics(&self) -> &StripMetrics {
        &self.metrics
    }

    pub fn state(&self) -> ScrubState {
        self.state
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn progress(&self) -> Progress {
        self.state.progress
    }

    pub fn offset(&self) -> f32 {
        self.state.offset
    }

    /// Pointer pressed over the strip at `pointer_x` (strip-local)
    pub fn begin_drag(&mut self, pointer_x: f32) -> Progress {
        self.drag_to(pointer_x)
    }

    /// Pointer moved; centres the handle under the pointer within bounds
    pub fn drag_to(&mut self, pointer_x: f32) -> Progress {
        self.phase = DragPhase::Dragging { pointer_x };

        let offset = clamp_offset(pointer_x - self.metrics.handle_width / 2.0, &self.metrics);
        self.state = ScrubState {
            progress: offset_to_progress(offset, &self.metrics),
            offset,
        };

        trace!(pointer_x, offset, progress = self.state.progress.value(), "scrub");
        self.state.progress
    }

    /// Pointer released. No snapping or inertia: the handle stays put.
    pub fn end_drag(&mut self) -> Progress {
        self.phase = DragPhase::Idle;
        self.state.progress
    }

    /// Layout changed; keep the progress and move the handle to match it
    pub fn set_metrics(&mut self, metrics: StripMetrics) {
        self.metrics = metrics;
        self.state.offset = progress_to_offset(self.state.progress, &self.metrics);
    }
}
