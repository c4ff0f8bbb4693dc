//! Network addresses and token definitions

use alloy::primitives::{Address, address};
use super::TokenDescriptor;

pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

// Uniswap V3 deployment on Sepolia
pub const UNISWAP_V3_FACTORY_SEPOLIA: Address = address!("0227628f3F023bb0B980b67D528571c95c6DaC1c");
pub const SWAP_ROUTER_02_SEPOLIA: Address = address!("3bFA4769FB09eefC5a80d6E87c3B9C650f7Ae48E");
pub const QUOTER_V2_SEPOLIA: Address = address!("Ed1f6473345F45b75F8179591dd5bA1888cf2FB3");

// Aave V3 deployment on Sepolia
pub const AAVE_V3_POOL_SEPOLIA: Address = address!("6Ae43d3271ff6888e7Fc43Fd7321a503ff738951");

pub const USDC_SEPOLIA: TokenDescriptor = TokenDescriptor {
    chain_id: SEPOLIA_CHAIN_ID,
    address: address!("94a9D9AC8a22534E3FaCa9F4e7F2E2cf85d5E4C8"),
    decimals: 6,
    symbol: "USDC",
    name: "USD//C",
};

pub const LINK_SEPOLIA: TokenDescriptor = TokenDescriptor {
    chain_id: SEPOLIA_CHAIN_ID,
    address: address!("f8Fb3713D459D7C1018BD0A49D19b4C44290EBE5"),
    decimals: 18,
    symbol: "LINK",
    name: "Chainlink",
};

pub const DAI_SEPOLIA: TokenDescriptor = TokenDescriptor {
    chain_id: SEPOLIA_CHAIN_ID,
    address: address!("FF34B3d4Aee8ddCd6F9AFFFB6Fe49bD371b8a357"),
    decimals: 18,
    symbol: "DAI",
    name: "Dai Stablecoin",
};

/// Contracts the pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub factory: Address,
    pub swap_router: Address,
    pub quoter: Address,
    pub lending_pool: Address,
}

impl ContractAddresses {
    pub const fn sepolia() -> Self {
        Self {
            factory: UNISWAP_V3_FACTORY_SEPOLIA,
            swap_router: SWAP_ROUTER_02_SEPOLIA,
            quoter: QUOTER_V2_SEPOLIA,
            lending_pool: AAVE_V3_POOL_SEPOLIA,
        }
    }
}
