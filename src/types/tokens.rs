//! Token descriptors and the swap/supply/borrow route

use alloy::primitives::Address;
use serde::Serialize;
use super::{DAI_SEPOLIA, LINK_SEPOLIA, USDC_SEPOLIA};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenDescriptor {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: &'static str,
    pub name: &'static str,
}

/// The three tokens a pipeline run touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRoute {
    /// Token spent on the swap
    pub input: TokenDescriptor,
    /// Token received from the swap and supplied as collateral
    pub collateral: TokenDescriptor,
    /// Token borrowed against the collateral
    pub debt: TokenDescriptor,
}

impl TokenRoute {
    pub const fn sepolia_usdc_link_dai() -> Self {
        Self {
            input: USDC_SEPOLIA,
            collateral: LINK_SEPOLIA,
            debt: DAI_SEPOLIA,
        }
    }
}

impl Default for TokenRoute {
    fn default() -> Self {
        Self::sepolia_usdc_link_dai()
    }
}
