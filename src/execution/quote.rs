//! Expected swap output from QuoterV2 and the slippage floor derived from it

use alloy::primitives::{Address, U256, aliases::{U160, U24}};
use tracing::{info, warn};
use crate::{
    contracts::IQuoterV2,
    errors::BotResult,
    execution::ExecutionContext,
    network::{Ledger, read_call},
    types::PoolInfo,
    utils::min_amount_out,
};

/// Static-calls `quoteExactInputSingle`; nothing is submitted.
pub async fn quote_exact_input_single(
    ledger: &dyn Ledger,
    quoter: Address,
    token_in: Address,
    token_out: Address,
    fee: u32,
    amount_in: U256,
) -> BotResult<U256> {
    let params = IQuoterV2::QuoteExactInputSingleParams {
        tokenIn: token_in,
        tokenOut: token_out,
        amountIn: amount_in,
        fee: U24::from(fee),
        sqrtPriceLimitX96: U160::ZERO,
    };
    let quote = read_call(ledger, quoter, &IQuoterV2::quoteExactInputSingleCall { params }).await?;
    Ok(quote.amountOut)
}

/// Minimum acceptable output for the configured slippage tolerance.
/// With the check disabled the quote is skipped and the minimum is zero.
pub async fn amount_out_minimum(
    ctx: &ExecutionContext,
    pool: &PoolInfo,
    amount_in: U256,
) -> BotResult<U256> {
    let Some(bps) = ctx.settings.slippage_bps else {
        warn!("⚠️ Slippage protection disabled: swap has no minimum output");
        return Ok(U256::ZERO);
    };

    let quoted = quote_exact_input_single(
        ctx.ledger(),
        ctx.contracts.quoter,
        ctx.route.input.address,
        ctx.route.collateral.address,
        pool.fee,
        amount_in,
    )
    .await?;
    let minimum = min_amount_out(quoted, bps);

    info!(%quoted, %minimum, slippage_bps = bps, "💱 Quoted swap output");
    Ok(minimum)
}
