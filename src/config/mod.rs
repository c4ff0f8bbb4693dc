//! Configuration management for the pipeline

pub mod settings;

pub use settings::*;
