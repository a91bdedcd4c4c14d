//! bookshelf - Personal Library Manager
//!
//! A terminal book catalog: add, remove and search books, see how much of
//! the collection has been read, with the library kept in a local JSON file.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
