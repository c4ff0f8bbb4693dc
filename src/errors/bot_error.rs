//! Custom error types for the pipeline

use alloy::primitives::{Address, TxHash};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Token approval failed: token {token} spender {spender} - {reason}")]
    ApprovalFailed {
        token: Address,
        spender: Address,
        reason: String,
    },

    #[error("Pool not found for {token_in}/{token_out} at fee tier {fee}")]
    PoolNotFound {
        token_in: Address,
        token_out: Address,
        fee: u32,
    },

    #[error("Swap execution failed: {reason}")]
    SwapExecutionFailed { reason: String },

    #[error("Supply of {asset} failed: {reason}")]
    SupplyFailed { asset: Address, reason: String },

    #[error("Borrow of {asset} failed: {reason}")]
    BorrowFailed { asset: Address, reason: String },

    #[error("Timed out after {waited:?} waiting for {operation}")]
    Timeout { operation: String, waited: Duration },

    #[error("Missing required configuration: {key}")]
    ConfigurationMissing { key: String },

    #[error("Invalid configuration {key}={value}: {reason}")]
    InvalidConfiguration {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Contract interaction failed: {contract} - {message}")]
    Contract {
        contract: Address,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },

    #[error("Data parsing error: {context}")]
    DataParsing {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type BotResult<T> = Result<T, BotError>;

impl BotError {
    /// Re-labels a lower level failure as a pipeline step failure.
    /// Timeouts and errors that already name a step are left as they are.
    pub fn into_step_error<F>(self, wrap: F) -> BotError
    where
        F: FnOnce(String) -> BotError,
    {
        if self.is_timeout() || self.is_step_failure() {
            return self;
        }
        let reason = self.to_string();
        wrap(reason)
    }

    pub fn is_step_failure(&self) -> bool {
        matches!(
            self,
            BotError::ApprovalFailed { .. }
                | BotError::PoolNotFound { .. }
                | BotError::SwapExecutionFailed { .. }
                | BotError::SupplyFailed { .. }
                | BotError::BorrowFailed { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BotError::Timeout { .. })
    }

    pub fn data_parsing(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        BotError::DataParsing {
            context: context.into(),
            source: source.into(),
        }
    }
}
