//! Pool resolution

pub mod info;

pub use info::*;
