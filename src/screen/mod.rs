pub mod cover_screen;

pub use cover_screen::{CoverScreen, ScreenCommand, ScreenError};
