//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the four library views with ratatui and maps key
//! presses onto application state methods.

pub mod input;
pub mod ui;

pub use input::*;
pub use ui::*;
