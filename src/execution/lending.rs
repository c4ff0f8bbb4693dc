//! Collateral supply and borrowing against the Aave V3 pool

use alloy::primitives::U256;
use rust_decimal::Decimal;
use tracing::{error, info};
use crate::{
    config::BorrowSizing,
    contracts::{IAaveOracle, IAavePool, IPoolAddressesProvider},
    errors::{BotError, BotResult},
    execution::ExecutionContext,
    network::{read_call, submit_call},
    tokens::{approve_raw, balance_of},
    types::TxReceipt,
    utils::{apply_ratio, floor_to_precision, pow10_u256, rescale},
};

#[derive(Debug, Clone)]
pub struct SupplyOutcome {
    pub supplied: U256,
    pub approval: TxReceipt,
    pub receipt: TxReceipt,
}

/// Approves the lending pool for the floored swap output and supplies it
/// on behalf of the signer.
pub async fn supply_collateral(ctx: &ExecutionContext, amount_out: U256) -> BotResult<SupplyOutcome> {
    let asset = ctx.route.collateral;
    let lending_pool = ctx.contracts.lending_pool;
    let signer = ctx.signer();
    let fail = |e: BotError| {
        error!("An error occurred during the supply: {}", e);
        e.into_step_error(|reason| BotError::SupplyFailed { asset: asset.address, reason })
    };

    let amount = floor_to_precision(amount_out, asset.decimals, ctx.settings.collateral_precision);
    if amount.is_zero() {
        return Err(fail(BotError::SupplyFailed {
            asset: asset.address,
            reason: format!("{} {} rounds down to zero", amount_out, asset.symbol),
        }));
    }

    let balance = balance_of(ctx.ledger(), asset.address, signer).await.map_err(fail)?;
    if amount > balance {
        return Err(fail(BotError::SupplyFailed {
            asset: asset.address,
            reason: format!("supply of {} exceeds wallet balance {}", amount, balance),
        }));
    }

    let approval = approve_raw(ctx.ledger(), asset.address, amount, lending_pool)
        .await
        .map_err(fail)?;

    info!(asset = %asset.address, %amount, "🏦 Supplying {} to lending pool...", asset.symbol);
    let call = IAavePool::supplyCall {
        asset: asset.address,
        amount,
        onBehalfOf: signer,
        referralCode: ctx.settings.referral_code,
    };
    let receipt = submit_call(ctx.ledger(), lending_pool, &call).await.map_err(fail)?;

    info!(tx_hash = %receipt.tx_hash, "✅ Supply confirmed");
    Ok(SupplyOutcome {
        supplied: amount,
        approval,
        receipt,
    })
}

/// `ratio × reference`, where the reference is already in debt-token units.
pub fn size_borrow(reference: U256, ratio: Decimal) -> BotResult<U256> {
    apply_ratio(reference, ratio)
}

/// Borrow amount in debt-token base units.
///
/// `input_amount` is the swap input in input-token base units; it is only
/// used by [`BorrowSizing::ReferenceAmount`].
pub async fn borrow_amount(ctx: &ExecutionContext, input_amount: U256) -> BotResult<U256> {
    let debt = ctx.route.debt;
    let reference = match ctx.settings.borrow_sizing {
        BorrowSizing::ReferenceAmount => {
            rescale(input_amount, ctx.route.input.decimals, debt.decimals)
        }
        BorrowSizing::AvailableCapacity => available_borrow_capacity(ctx).await?,
    };

    let amount = size_borrow(reference, ctx.settings.borrow_ratio)?;
    info!(
        sizing = ?ctx.settings.borrow_sizing,
        %reference,
        ratio = %ctx.settings.borrow_ratio,
        %amount,
        "📐 Sized borrow of {}",
        debt.symbol
    );
    Ok(amount)
}

/// Remaining borrow capacity of the signer, converted from the protocol's
/// base currency into debt-token base units via the protocol oracle.
pub async fn available_borrow_capacity(ctx: &ExecutionContext) -> BotResult<U256> {
    let ledger = ctx.ledger();
    let pool = ctx.contracts.lending_pool;
    let debt = ctx.route.debt;

    let account = read_call(ledger, pool, &IAavePool::getUserAccountDataCall { user: ctx.signer() }).await?;
    let provider = read_call(ledger, pool, &IAavePool::ADDRESSES_PROVIDERCall {}).await?.provider;
    let oracle = read_call(ledger, provider, &IPoolAddressesProvider::getPriceOracleCall {})
        .await?
        .oracle;
    let price = read_call(ledger, oracle, &IAaveOracle::getAssetPriceCall { asset: debt.address })
        .await?
        .price;

    if price.is_zero() {
        return Err(BotError::Contract {
            contract: oracle,
            message: format!("oracle has no price for {}", debt.symbol),
            source: anyhow::anyhow!("zero price"),
        });
    }

    // base units and the oracle price share the same base currency decimals
    Ok(account.availableBorrowsBase * pow10_u256(debt.decimals as u32) / price)
}

pub async fn borrow(ctx: &ExecutionContext, amount: U256) -> BotResult<TxReceipt> {
    let debt = ctx.route.debt;
    let fail = |e: BotError| {
        error!("An error occurred during the borrow: {}", e);
        e.into_step_error(|reason| BotError::BorrowFailed { asset: debt.address, reason })
    };

    if amount.is_zero() {
        return Err(fail(BotError::BorrowFailed {
            asset: debt.address,
            reason: "borrow amount is zero".to_string(),
        }));
    }

    info!(asset = %debt.address, %amount, "💸 Borrowing {} from lending pool...", debt.symbol);
    let call = IAavePool::borrowCall {
        asset: debt.address,
        amount,
        interestRateMode: U256::from(ctx.settings.interest_rate_mode),
        referralCode: ctx.settings.referral_code,
        onBehalfOf: ctx.signer(),
    };
    let receipt = submit_call(ctx.ledger(), ctx.contracts.lending_pool, &call)
        .await
        .map_err(fail)?;

    info!(tx_hash = %receipt.tx_hash, "✅ Borrow confirmed");
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_ratio_borrows_half_the_reference() {
        let one_dai = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(
            size_borrow(one_dai, dec!(0.5)).unwrap(),
            U256::from(500_000_000_000_000_000u128)
        );
    }

    #[test]
    fn custom_ratio_is_applied() {
        let reference = U256::from(1_000u64);
        assert_eq!(size_borrow(reference, dec!(0.25)).unwrap(), U256::from(250u64));
    }
}
