//! Core data types and structures

pub mod addresses;
pub mod tokens;
pub mod execution;
pub mod pools;

pub use addresses::*;
pub use tokens::*;
pub use execution::*;
pub use pools::*;
