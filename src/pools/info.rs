//! Pool resolution through the Uniswap V3 factory

use alloy::primitives::{Address, aliases::U24};
use tracing::{debug, error, info};
use crate::{
    contracts::{IUniswapV3Factory, IUniswapV3Pool},
    errors::{BotError, BotResult},
    network::{Ledger, read_call},
    types::{PoolInfo, TokenDescriptor},
};

/// Looks up the pool for `token_in`/`token_out` at `fee` and reads its
/// tokens and fee. Every call goes back to the chain.
pub async fn get_pool_info(
    ledger: &dyn Ledger,
    factory: Address,
    token_in: &TokenDescriptor,
    token_out: &TokenDescriptor,
    fee: u32,
) -> BotResult<PoolInfo> {
    debug!("Resolving {}/{} pool at fee tier {}", token_in.symbol, token_out.symbol, fee);

    let not_found = || BotError::PoolNotFound {
        token_in: token_in.address,
        token_out: token_out.address,
        fee,
    };

    let address = read_call(
        ledger,
        factory,
        &IUniswapV3Factory::getPoolCall {
            tokenA: token_in.address,
            tokenB: token_out.address,
            fee: U24::from(fee),
        },
    )
    .await
    .map_err(|e| {
        error!("Factory lookup failed: {}", e);
        e
    })?
    .pool;

    if address == Address::ZERO {
        error!("❌ No {}/{} pool at fee tier {}", token_in.symbol, token_out.symbol, fee);
        return Err(not_found());
    }

    let (token0, token1, pool_fee) = tokio::try_join!(
        read_call(ledger, address, &IUniswapV3Pool::token0Call {}),
        read_call(ledger, address, &IUniswapV3Pool::token1Call {}),
        read_call(ledger, address, &IUniswapV3Pool::feeCall {}),
    )?;

    let pool = PoolInfo {
        address,
        token0: token0.token,
        token1: token1.token,
        fee: pool_fee.fee.to::<u32>(),
    };

    if !pool.contains(token_in.address) || !pool.contains(token_out.address) {
        error!("❌ Pool {} does not hold {}/{}", address, token_in.symbol, token_out.symbol);
        return Err(not_found());
    }

    info!(
        pool = %pool.address,
        token0 = %pool.token0,
        token1 = %pool.token1,
        fee = pool.fee,
        "🔍 Resolved {}/{} pool",
        token_in.symbol,
        token_out.symbol
    );
    Ok(pool)
}
