//! Solidity bindings for every contract the pipeline calls
//!
//! These are the wire schemas of the external services and must match the
//! deployed contracts exactly.

pub mod erc20;
pub mod uniswap;
pub mod aave;

pub use erc20::*;
pub use uniswap::*;
pub use aave::*;
