//! egui front end for the cover picker.

pub mod app;
pub mod strip_view;
pub mod textures;

pub use app::CoverPickerApp;
pub use strip_view::StripView;
