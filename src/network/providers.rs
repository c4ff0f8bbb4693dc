//! Network provider setup and the provider-backed ledger

use alloy::{
    network::{EthereumWallet, ReceiptResponse},
    primitives::{Address, Bytes},
    providers::{Provider, ProviderBuilder},
    rpc::types::eth::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use crate::{
    config::Config,
    errors::{BotError, BotResult},
    network::Ledger,
    types::TxReceipt,
    utils::mask_secret,
};

pub struct RpcLedger {
    provider: Arc<dyn Provider>,
    signer: Address,
    confirmation_timeout: Duration,
}

impl RpcLedger {
    pub fn new(provider: Arc<dyn Provider>, signer: Address, confirmation_timeout: Duration) -> Self {
        Self {
            provider,
            signer,
            confirmation_timeout,
        }
    }

    fn request(&self, to: Address, input: Bytes) -> TransactionRequest {
        TransactionRequest::default()
            .from(self.signer)
            .to(to)
            .input(input.into())
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn call(&self, to: Address, input: Bytes) -> BotResult<Bytes> {
        let tx = self.request(to, input);
        self.provider.call(&tx).await.map_err(|e| BotError::Network {
            message: format!("eth_call to {} failed", to),
            source: Some(e.into()),
        })
    }

    async fn send(&self, to: Address, input: Bytes) -> BotResult<TxReceipt> {
        let tx = self.request(to, input);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| BotError::Network {
                message: format!("failed to send transaction to {}", to),
                source: Some(e.into()),
            })?;

        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "📡 Transaction sent, waiting for confirmation");

        let waited = self.confirmation_timeout;
        tokio::select! {
            result = pending.with_required_confirmations(1).get_receipt() => {
                let receipt = result.map_err(|e| BotError::Network {
                    message: format!("transaction {} was not confirmed", tx_hash),
                    source: Some(e.into()),
                })?;
                info!(
                    %tx_hash,
                    block = ?receipt.block_number(),
                    success = receipt.status(),
                    "✅ Transaction confirmed"
                );
                Ok(TxReceipt {
                    tx_hash: receipt.transaction_hash,
                    block_number: receipt.block_number(),
                    success: receipt.status(),
                    logs: receipt.inner.logs().iter().map(|log| log.inner.clone()).collect(),
                })
            }
            _ = tokio::time::sleep(waited) => {
                warn!(%tx_hash, "⏱️ Confirmation timed out after {:?}", waited);
                Err(BotError::Timeout {
                    operation: format!("confirmation of {}", tx_hash),
                    waited,
                })
            }
        }
    }
}

/// Connects with a signing wallet and checks the endpoint serves the
/// configured chain.
pub async fn setup_provider(config: &Config) -> BotResult<RpcLedger> {
    let signer = PrivateKeySigner::from_str(config.private_key.trim()).map_err(|e| {
        BotError::InvalidConfiguration {
            key: "PRIVATE_KEY".to_string(),
            value: mask_secret(&config.private_key),
            reason: e.to_string(),
        }
    })?;
    let address = signer.address();
    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_builtin(&config.rpc_url)
        .await
        .map_err(|e| BotError::Network {
            message: format!("failed to connect to {}", mask_secret(&config.rpc_url)),
            source: Some(e.into()),
        })?;
    let provider: Arc<dyn Provider> = Arc::new(provider);

    info!("🔗 Testing connection to {}...", config.network);
    let block = provider.get_block_number().await.map_err(|e| BotError::Network {
        message: "failed to get block number".to_string(),
        source: Some(e.into()),
    })?;
    verify_chain_id(provider.as_ref(), config.chain_id).await?;
    info!("✅ Connected to {} at block {} as {}", config.network, block, address);

    Ok(RpcLedger::new(
        provider,
        address,
        Duration::from_secs(config.confirmation_timeout_secs),
    ))
}

pub async fn verify_chain_id(provider: &dyn Provider, expected: u64) -> BotResult<u64> {
    let chain_id = provider.get_chain_id().await.map_err(|e| BotError::Network {
        message: "failed to get chain id".to_string(),
        source: Some(e.into()),
    })?;

    if chain_id != expected {
        return Err(BotError::InvalidConfiguration {
            key: "CHAIN_ID".to_string(),
            value: expected.to_string(),
            reason: format!("endpoint serves chain {}", chain_id),
        });
    }
    Ok(chain_id)
}
