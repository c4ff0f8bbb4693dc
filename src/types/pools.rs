//! Pool-related types and structures

use alloy::primitives::{Address, U256, aliases::U160};

/// Uniswap V3 pool as resolved through the factory. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
}

impl PoolInfo {
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }
}

/// Parameters for SwapRouter02 `exactInputSingle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParameters {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U160,
}
