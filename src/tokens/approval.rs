//! Token approval step

use alloy::primitives::{Address, U256};
use tracing::{error, info, warn};
use crate::{
    contracts::IERC20,
    errors::{BotError, BotResult},
    network::{Ledger, submit_call},
    tokens::allowance,
    types::TxReceipt,
    utils::parse_units,
};

/// Approves `spender` for `amount` (a decimal string) of `token`, scaled by
/// `decimals`, and waits for confirmation.
pub async fn approve_token(
    ledger: &dyn Ledger,
    token: Address,
    amount: &str,
    decimals: u8,
    spender: Address,
) -> BotResult<TxReceipt> {
    let raw = parse_units(amount, decimals).map_err(|e| {
        error!("Invalid approval amount '{}': {}", amount, e);
        e.into_step_error(|reason| BotError::ApprovalFailed { token, spender, reason })
    })?;
    approve_raw(ledger, token, raw, spender).await
}

/// Same as [`approve_token`] for an amount already in base units.
pub async fn approve_raw(
    ledger: &dyn Ledger,
    token: Address,
    amount: U256,
    spender: Address,
) -> BotResult<TxReceipt> {
    info!(%token, %spender, %amount, "📝 Sending approval transaction...");

    let receipt = submit_call(ledger, token, &IERC20::approveCall { spender, amount })
        .await
        .map_err(|e| {
            error!("An error occurred during token approval: {}", e);
            e.into_step_error(|reason| BotError::ApprovalFailed { token, spender, reason })
        })?;

    info!(tx_hash = %receipt.tx_hash, "✅ Approval transaction confirmed");

    match allowance(ledger, token, ledger.signer(), spender).await {
        Ok(current) if current != amount => {
            warn!("Allowance for {} is {} after approving {}", spender, current, amount);
        }
        Ok(_) => {}
        Err(e) => warn!("Could not read back allowance for {}: {}", spender, e),
    }

    Ok(receipt)
}
