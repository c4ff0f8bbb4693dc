//! Token amount arithmetic
//!
//! Human amounts are `Decimal`, on-chain amounts are `U256` base units. All
//! conversions are exact: anything that would lose precision is an error.

use alloy::primitives::U256;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::str::FromStr;
use crate::errors::{BotError, BotResult};

const BPS_DENOMINATOR: u64 = 10_000;

/// `10^n`, or `None` past the 28 digits a `Decimal` can hold.
pub fn pow10(n: u32) -> Option<Decimal> {
    match n {
        0 => Some(dec!(1)),
        6 => Some(dec!(1_000_000)),
        18 => Some(dec!(1_000_000_000_000_000_000)),
        _ => (0..n).try_fold(dec!(1), |acc, _| acc.checked_mul(dec!(10))),
    }
}

pub fn pow10_u256(n: u32) -> U256 {
    U256::from(10u64).pow(U256::from(n))
}

/// `amount × 10^decimals` as base units.
pub fn to_base_units(amount: Decimal, decimals: u8) -> BotResult<U256> {
    if amount.is_sign_negative() {
        return Err(amount_error(amount, "amount is negative"));
    }

    let scale = pow10(decimals as u32)
        .ok_or_else(|| amount_error(decimals, "token decimals exceed decimal precision"))?;
    let scaled = amount
        .checked_mul(scale)
        .ok_or_else(|| amount_error(amount, "amount overflows decimal range"))?;
    if !scaled.fract().is_zero() {
        return Err(amount_error(
            amount,
            &format!("more than {} fractional digits", decimals),
        ));
    }

    let raw = scaled
        .to_u128()
        .ok_or_else(|| amount_error(amount, "amount does not fit in u128"))?;
    Ok(U256::from(raw))
}

/// Parses a decimal string such as `"1.5"` into base units.
pub fn parse_units(amount: &str, decimals: u8) -> BotResult<U256> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|e| BotError::data_parsing(format!("invalid amount '{}'", amount), e))?;
    to_base_units(value, decimals)
}

/// Base units back to a human amount.
pub fn from_base_units(raw: U256, decimals: u8) -> BotResult<Decimal> {
    let value = u128::try_from(raw)
        .ok()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or_else(|| BotError::data_parsing(
            "amount out of range",
            anyhow::anyhow!("{} does not fit in i128", raw),
        ))?;

    Decimal::try_from_i128_with_scale(value, decimals as u32)
        .map(|d| d.normalize())
        .map_err(|e| BotError::data_parsing(format!("amount {} out of decimal range", raw), e))
}

/// Drops every fractional digit past `precision`, so the result never
/// exceeds `raw`.
pub fn floor_to_precision(raw: U256, decimals: u8, precision: u32) -> U256 {
    let decimals = decimals as u32;
    if decimals <= precision {
        return raw;
    }
    let step = pow10_u256(decimals - precision);
    raw - raw % step
}

/// `raw × ratio`, floored.
pub fn apply_ratio(raw: U256, ratio: Decimal) -> BotResult<U256> {
    if ratio.is_sign_negative() {
        return Err(amount_error(ratio, "ratio is negative"));
    }
    let mantissa = u128::try_from(ratio.mantissa())
        .map_err(|e| BotError::data_parsing("ratio mantissa", e))?;

    raw.checked_mul(U256::from(mantissa))
        .map(|scaled| scaled / pow10_u256(ratio.scale()))
        .ok_or_else(|| amount_error(ratio, "ratio application overflows"))
}

/// Re-expresses an amount of one token in the base units of a token with
/// different decimals, keeping the numeric value.
pub fn rescale(raw: U256, from_decimals: u8, to_decimals: u8) -> U256 {
    match from_decimals.cmp(&to_decimals) {
        std::cmp::Ordering::Equal => raw,
        std::cmp::Ordering::Less => raw.saturating_mul(pow10_u256((to_decimals - from_decimals) as u32)),
        std::cmp::Ordering::Greater => raw / pow10_u256((from_decimals - to_decimals) as u32),
    }
}

/// Lower bound on swap output for a quote and slippage tolerance in bps.
pub fn min_amount_out(quote: U256, slippage_bps: u32) -> U256 {
    let keep = BPS_DENOMINATOR.saturating_sub(slippage_bps as u64);
    quote.saturating_mul(U256::from(keep)) / U256::from(BPS_DENOMINATOR)
}

fn amount_error(value: impl std::fmt::Display, reason: &str) -> BotError {
    BotError::data_parsing(
        format!("invalid amount {}", value),
        anyhow::anyhow!("{}", reason),
    )
}
