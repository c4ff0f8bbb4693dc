//! Swap executor: exact-input single-hop swaps through SwapRouter02

use alloy::primitives::{Address, Log, U256, aliases::{U160, U24}};
use alloy::sol_types::SolEvent;
use tracing::{error, info};
use crate::{
    config::OutputStrategy,
    contracts::{ISwapRouter02, IUniswapV3Pool},
    errors::{BotError, BotResult},
    execution::ExecutionContext,
    network::submit_call,
    tokens::balance_of,
    types::{PoolInfo, SwapParameters, TxReceipt},
};

#[derive(Debug, Clone)]
pub struct SwapOutcome {
    pub receipt: TxReceipt,
    pub amount_out: U256,
}

/// Exact-input parameters for the route's input → collateral swap. The
/// price limit is always zero.
pub fn build_swap_params(
    ctx: &ExecutionContext,
    pool: &PoolInfo,
    amount_in: U256,
    amount_out_minimum: U256,
) -> SwapParameters {
    SwapParameters {
        token_in: ctx.route.input.address,
        token_out: ctx.route.collateral.address,
        fee: pool.fee,
        recipient: ctx.signer(),
        amount_in,
        amount_out_minimum,
        sqrt_price_limit_x96: U160::ZERO,
    }
}

impl From<&SwapParameters> for ISwapRouter02::ExactInputSingleParams {
    fn from(params: &SwapParameters) -> Self {
        Self {
            tokenIn: params.token_in,
            tokenOut: params.token_out,
            fee: U24::from(params.fee),
            recipient: params.recipient,
            amountIn: params.amount_in,
            amountOutMinimum: params.amount_out_minimum,
            sqrtPriceLimitX96: params.sqrt_price_limit_x96,
        }
    }
}

pub async fn execute_swap(
    ctx: &ExecutionContext,
    pool: &PoolInfo,
    params: &SwapParameters,
) -> BotResult<SwapOutcome> {
    let fail = |e: BotError| {
        error!("An error occurred during the swap: {}", e);
        e.into_step_error(|reason| BotError::SwapExecutionFailed { reason })
    };
    let ledger = ctx.ledger();

    let balance_before = match ctx.settings.output_strategy {
        OutputStrategy::BalanceDelta => Some(
            balance_of(ledger, params.token_out, params.recipient)
                .await
                .map_err(fail)?,
        ),
        OutputStrategy::SwapEvent => None,
    };

    info!(
        token_in = %params.token_in,
        token_out = %params.token_out,
        amount_in = %params.amount_in,
        min_out = %params.amount_out_minimum,
        "🔄 Sending swap transaction..."
    );
    let call = ISwapRouter02::exactInputSingleCall { params: params.into() };
    let receipt = submit_call(ledger, ctx.contracts.swap_router, &call)
        .await
        .map_err(fail)?;

    let amount_out = match balance_before {
        Some(before) => {
            let after = balance_of(ledger, params.token_out, params.recipient)
                .await
                .map_err(fail)?;
            balance_delta(before, after).map_err(fail)?
        }
        None => decode_swap_output(&receipt.logs, pool, params.token_out, params.recipient)
            .map_err(fail)?,
    };

    if amount_out.is_zero() {
        error!(tx_hash = %receipt.tx_hash, "Swap produced no output");
        return Err(BotError::SwapExecutionFailed {
            reason: format!("swap {} produced no output", receipt.tx_hash),
        });
    }

    info!(tx_hash = %receipt.tx_hash, %amount_out, "✅ Swap confirmed");
    Ok(SwapOutcome { receipt, amount_out })
}

/// `after − before`; a shrinking balance is an error rather than a
/// negative output.
pub fn balance_delta(before: U256, after: U256) -> BotResult<U256> {
    after.checked_sub(before).ok_or_else(|| BotError::SwapExecutionFailed {
        reason: format!("output balance decreased from {} to {}", before, after),
    })
}

/// Reads the amount paid out for `token_out` from the pool's `Swap` event
/// addressed to `recipient`. The pool reports amounts from its own side, so
/// the output is negative.
pub fn decode_swap_output(
    logs: &[Log],
    pool: &PoolInfo,
    token_out: Address,
    recipient: Address,
) -> BotResult<U256> {
    let swap = logs
        .iter()
        .filter(|log| log.address == pool.address)
        .filter(|log| log.data.topics().first() == Some(&IUniswapV3Pool::Swap::SIGNATURE_HASH))
        .filter_map(|log| IUniswapV3Pool::Swap::decode_log_data(&log.data, true).ok())
        .find(|swap| swap.recipient == recipient)
        .ok_or_else(|| BotError::SwapExecutionFailed {
            reason: format!("no Swap event from pool {} to {}", pool.address, recipient),
        })?;

    let delta = if token_out == pool.token0 {
        swap.amount0
    } else if token_out == pool.token1 {
        swap.amount1
    } else {
        return Err(BotError::SwapExecutionFailed {
            reason: format!("token {} is not in pool {}", token_out, pool.address),
        });
    };

    if !delta.is_negative() {
        return Err(BotError::SwapExecutionFailed {
            reason: format!("pool did not pay out {} (delta {})", token_out, delta),
        });
    }
    Ok(delta.unsigned_abs())
}
