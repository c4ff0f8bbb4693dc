//! Error types shared by every pipeline step

pub mod bot_error;

pub use bot_error::*;
