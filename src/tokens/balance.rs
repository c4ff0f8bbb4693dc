//! ERC-20 balance and allowance reads

use alloy::primitives::{Address, U256};
use tracing::debug;
use crate::{
    contracts::IERC20,
    errors::BotResult,
    network::{Ledger, read_call},
};

pub async fn balance_of(ledger: &dyn Ledger, token: Address, owner: Address) -> BotResult<U256> {
    let balance = read_call(ledger, token, &IERC20::balanceOfCall { account: owner })
        .await?
        .balance;
    debug!("Balance of {} in {}: {}", owner, token, balance);
    Ok(balance)
}

pub async fn allowance(
    ledger: &dyn Ledger,
    token: Address,
    owner: Address,
    spender: Address,
) -> BotResult<U256> {
    Ok(read_call(ledger, token, &IERC20::allowanceCall { owner, spender })
        .await?
        .remaining)
}
