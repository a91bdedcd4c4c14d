//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the library store owns the session's books, and the application state
//! turns user intents into store operations.

pub mod state;
pub mod store;

pub use state::*;
pub use store::*;
