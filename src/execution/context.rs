//! Execution context shared by every pipeline step

use alloy::primitives::Address;
use rust_decimal::Decimal;
use std::sync::Arc;
use crate::{
    config::{
        BorrowSizing, Config, OutputStrategy, DEFAULT_BORROW_RATIO, DEFAULT_COLLATERAL_PRECISION,
        DEFAULT_POOL_FEE_TIER, DEFAULT_SLIPPAGE_BPS, REFERRAL_CODE, VARIABLE_RATE_MODE,
    },
    network::Ledger,
    types::{ContractAddresses, TokenRoute},
};

#[derive(Debug, Clone, PartialEq)]
pub struct StrategySettings {
    pub fee_tier: u32,
    /// `None` submits swaps without a minimum output
    pub slippage_bps: Option<u32>,
    pub output_strategy: OutputStrategy,
    pub borrow_sizing: BorrowSizing,
    pub borrow_ratio: Decimal,
    pub interest_rate_mode: u8,
    pub referral_code: u16,
    pub collateral_precision: u32,
}

impl StrategySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fee_tier: config.pool_fee_tier,
            slippage_bps: config.slippage_tolerance_bps,
            output_strategy: config.output_strategy,
            borrow_sizing: config.borrow_sizing,
            borrow_ratio: config.borrow_ratio,
            interest_rate_mode: config.interest_rate_mode,
            referral_code: REFERRAL_CODE,
            collateral_precision: config.collateral_precision,
        }
    }
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            fee_tier: DEFAULT_POOL_FEE_TIER,
            slippage_bps: Some(DEFAULT_SLIPPAGE_BPS),
            output_strategy: OutputStrategy::BalanceDelta,
            borrow_sizing: BorrowSizing::ReferenceAmount,
            borrow_ratio: DEFAULT_BORROW_RATIO,
            interest_rate_mode: VARIABLE_RATE_MODE,
            referral_code: REFERRAL_CODE,
            collateral_precision: DEFAULT_COLLATERAL_PRECISION,
        }
    }
}

/// Built once per process and passed by reference into every step.
pub struct ExecutionContext {
    pub ledger: Arc<dyn Ledger>,
    pub contracts: ContractAddresses,
    pub route: TokenRoute,
    pub settings: StrategySettings,
    pub network: String,
}

impl ExecutionContext {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        contracts: ContractAddresses,
        route: TokenRoute,
        settings: StrategySettings,
    ) -> Self {
        Self {
            ledger,
            contracts,
            route,
            settings,
            network: "sepolia".to_string(),
        }
    }

    pub fn from_config(ledger: Arc<dyn Ledger>, config: &Config) -> Self {
        Self {
            network: config.network.clone(),
            ..Self::new(
                ledger,
                ContractAddresses::sepolia(),
                TokenRoute::sepolia_usdc_link_dai(),
                StrategySettings::from_config(config),
            )
        }
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    pub fn signer(&self) -> Address {
        self.ledger.signer()
    }
}
