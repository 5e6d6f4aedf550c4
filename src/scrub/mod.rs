pub mod controller;
pub mod state;

pub use controller::{clamp_offset, offset_to_progress, progress_to_offset, ScrubController};
pub use state::{DragPhase, ScrubState, StripMetrics};
