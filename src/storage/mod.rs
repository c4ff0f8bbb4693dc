//! Data persistence and file operations

pub mod runs;

pub use runs::*;
