//! Swap, supply and borrow pipeline for Sepolia
//!
//! Swaps USDC for LINK through a Uniswap V3 pool, supplies the LINK to an
//! Aave V3 pool as collateral and borrows DAI against it. Every step waits
//! for its transaction to confirm before the next one starts.

pub mod config;
pub mod contracts;
pub mod types;
pub mod errors;
pub mod network;
pub mod tokens;
pub mod pools;
pub mod execution;
pub mod utils;
pub mod storage;

// Re-export commonly used items
pub use config::Config;
pub use errors::{BotError, BotResult};
pub use execution::{ExecutionContext, Pipeline, StrategySettings};
pub use network::{Ledger, RpcLedger};
pub use types::*;
