//! Pipeline steps and the controller that sequences them

pub mod context;
pub mod quote;
pub mod swap;
pub mod lending;
pub mod engine;

pub use context::*;
pub use quote::*;
pub use swap::*;
pub use lending::*;
pub use engine::*;
