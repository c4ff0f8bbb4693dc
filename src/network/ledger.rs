//! Ledger abstraction shared by every pipeline step

use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolCall,
};
use async_trait::async_trait;
use tracing::debug;
use crate::{
    errors::{BotError, BotResult},
    types::TxReceipt,
};

/// Read and write access to the chain on behalf of a single signer.
///
/// Transactions are submitted one at a time from [`Ledger::signer`];
/// `send` only returns once the transaction is confirmed or the
/// confirmation timeout elapses.
#[async_trait]
pub trait Ledger: Send + Sync {
    fn signer(&self) -> Address;

    async fn call(&self, to: Address, input: Bytes) -> BotResult<Bytes>;

    async fn send(&self, to: Address, input: Bytes) -> BotResult<TxReceipt>;
}

pub async fn read_call<C: SolCall>(
    ledger: &dyn Ledger,
    to: Address,
    call: &C,
) -> BotResult<C::Return> {
    let output = ledger.call(to, call.abi_encode().into()).await?;
    C::abi_decode_returns(&output, true).map_err(|e| BotError::Contract {
        contract: to,
        message: format!("failed to decode {} output", C::SIGNATURE),
        source: e.into(),
    })
}

/// Submits `call` to `to` and rejects reverted receipts.
pub async fn submit_call<C: SolCall>(
    ledger: &dyn Ledger,
    to: Address,
    call: &C,
) -> BotResult<TxReceipt> {
    debug!("Submitting {} to {}", C::SIGNATURE, to);
    let receipt = ledger.send(to, call.abi_encode().into()).await?;
    if !receipt.success {
        return Err(BotError::Reverted { tx_hash: receipt.tx_hash });
    }
    Ok(receipt)
}
