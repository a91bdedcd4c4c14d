//! Infrastructure layer providing external service integrations.
//!
//! This module contains the JSON file store for the library and the
//! logging setup.

pub mod logging;
pub mod persistence;

pub use logging::*;
pub use persistence::*;
