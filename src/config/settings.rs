//! Pipeline configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::fmt;
use std::str::FromStr;
use crate::errors::{BotError, BotResult};
use crate::types::SEPOLIA_CHAIN_ID;

// Configuration constants
pub const DEFAULT_SWAP_AMOUNT: Decimal = dec!(1);
pub const DEFAULT_POOL_FEE_TIER: u32 = 3000;
pub const MAX_POOL_FEE_TIER: u32 = 1_000_000; // hundredths of a bip
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50; // 0.5%
pub const MAX_SLIPPAGE_BPS: u32 = 1000; // 10%
pub const DEFAULT_BORROW_RATIO: Decimal = dec!(0.5);
pub const MAX_BORROW_RATIO: Decimal = dec!(0.9);
pub const VARIABLE_RATE_MODE: u8 = 2;
pub const REFERRAL_CODE: u16 = 0;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_COLLATERAL_PRECISION: u32 = 11;
pub const DEFAULT_EXPLORER_URL: &str = "https://sepolia.etherscan.io";

/// How the realized swap output is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStrategy {
    /// Recipient balance after confirmation minus balance before submission
    BalanceDelta,
    /// Output side of the pool's `Swap` event in the receipt
    SwapEvent,
}

impl FromStr for OutputStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balance_delta" | "balance" => Ok(OutputStrategy::BalanceDelta),
            "swap_event" | "event" | "logs" => Ok(OutputStrategy::SwapEvent),
            other => Err(format!("unknown output strategy '{}'", other)),
        }
    }
}

/// Which quantity the borrow ratio is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowSizing {
    /// The swap input amount, read in debt-token units
    ReferenceAmount,
    /// The lending pool's available borrow capacity for the signer
    AvailableCapacity,
}

impl FromStr for BorrowSizing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" | "input" => Ok(BorrowSizing::ReferenceAmount),
            "capacity" | "collateral" => Ok(BorrowSizing::AvailableCapacity),
            other => Err(format!("unknown borrow sizing '{}'", other)),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
    pub network: String,
    pub chain_id: u64,
    pub explorer_url: String,
    pub swap_amount: Decimal,
    pub pool_fee_tier: u32,
    pub slippage_tolerance_bps: Option<u32>,
    pub borrow_ratio: Decimal,
    pub borrow_sizing: BorrowSizing,
    pub output_strategy: OutputStrategy,
    pub interest_rate_mode: u8,
    pub confirmation_timeout_secs: u64,
    pub collateral_precision: u32,
}

impl Config {
    pub fn load() -> BotResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BotError::ConfigurationMissing { key: key.to_string() })
        };

        let swap_amount = parse_key(lookup("SWAP_AMOUNT"), "SWAP_AMOUNT", DEFAULT_SWAP_AMOUNT)?;
        if swap_amount <= Decimal::ZERO {
            return Err(invalid("SWAP_AMOUNT", swap_amount, "must be positive"));
        }

        let borrow_ratio = parse_key(lookup("BORROW_RATIO"), "BORROW_RATIO", DEFAULT_BORROW_RATIO)?;
        if borrow_ratio <= Decimal::ZERO {
            return Err(invalid("BORROW_RATIO", borrow_ratio, "must be positive"));
        }

        let interest_rate_mode: u8 =
            parse_key(lookup("INTEREST_RATE_MODE"), "INTEREST_RATE_MODE", VARIABLE_RATE_MODE)?;
        if !(1..=2).contains(&interest_rate_mode) {
            return Err(invalid(
                "INTEREST_RATE_MODE",
                interest_rate_mode,
                "must be 1 (stable) or 2 (variable)",
            ));
        }

        // "off" disables the minimum-output check entirely
        let slippage_tolerance_bps = match lookup("SLIPPAGE_TOLERANCE_BPS") {
            Some(raw) if matches!(raw.trim().to_ascii_lowercase().as_str(), "off" | "none") => None,
            raw => Some(
                parse_key(raw, "SLIPPAGE_TOLERANCE_BPS", DEFAULT_SLIPPAGE_BPS)?.min(MAX_SLIPPAGE_BPS),
            ),
        };

        let pool_fee_tier: u32 = parse_key(lookup("POOL_FEE_TIER"), "POOL_FEE_TIER", DEFAULT_POOL_FEE_TIER)?;
        if pool_fee_tier > MAX_POOL_FEE_TIER {
            return Err(invalid("POOL_FEE_TIER", pool_fee_tier, "exceeds 100% fee"));
        }

        let borrow_sizing = match lookup("BORROW_SIZING") {
            Some(raw) => raw
                .parse()
                .map_err(|reason| invalid("BORROW_SIZING", &raw, reason))?,
            None => BorrowSizing::ReferenceAmount,
        };

        let output_strategy = match lookup("OUTPUT_STRATEGY") {
            Some(raw) => raw
                .parse()
                .map_err(|reason| invalid("OUTPUT_STRATEGY", &raw, reason))?,
            None => OutputStrategy::BalanceDelta,
        };

        Ok(Self {
            rpc_url: required("RPC_URL")?,
            private_key: required("PRIVATE_KEY")?,
            network: lookup("NETWORK").unwrap_or_else(|| "sepolia".to_string()),
            chain_id: parse_key(lookup("CHAIN_ID"), "CHAIN_ID", SEPOLIA_CHAIN_ID)?,
            explorer_url: lookup("EXPLORER_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string()),
            swap_amount,
            pool_fee_tier,
            slippage_tolerance_bps,
            borrow_ratio: borrow_ratio.min(MAX_BORROW_RATIO),
            borrow_sizing,
            output_strategy,
            interest_rate_mode,
            confirmation_timeout_secs: parse_key(
                lookup("CONFIRMATION_TIMEOUT_SECS"),
                "CONFIRMATION_TIMEOUT_SECS",
                DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            )?
            .max(1),
            collateral_precision: parse_key::<u32>(
                lookup("COLLATERAL_PRECISION"),
                "COLLATERAL_PRECISION",
                DEFAULT_COLLATERAL_PRECISION,
            )?
            .min(18),
        })
    }
}

/// Parses a present, non-blank value; absent or blank keys take `default`.
fn parse_key<T>(raw: Option<String>, key: &str, default: T) -> BotResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse()
            .map_err(|e| invalid(key, value, format!("cannot parse: {}", e))),
        None => Ok(default),
    }
}

fn invalid(key: &str, value: impl fmt::Display, reason: impl Into<String>) -> BotError {
    BotError::InvalidConfiguration {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &crate::utils::mask_secret(&self.rpc_url))
            .field("private_key", &crate::utils::mask_secret(&self.private_key))
            .field("network", &self.network)
            .field("chain_id", &self.chain_id)
            .field("explorer_url", &self.explorer_url)
            .field("swap_amount", &self.swap_amount)
            .field("pool_fee_tier", &self.pool_fee_tier)
            .field("slippage_tolerance_bps", &self.slippage_tolerance_bps)
            .field("borrow_ratio", &self.borrow_ratio)
            .field("borrow_sizing", &self.borrow_sizing)
            .field("output_strategy", &self.output_strategy)
            .field("interest_rate_mode", &self.interest_rate_mode)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .field("collateral_precision", &self.collateral_precision)
            .finish()
    }
}
