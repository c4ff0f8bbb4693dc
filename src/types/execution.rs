//! Transaction and pipeline run types

use alloy::primitives::{Log, TxHash};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// The parts of a confirmed transaction receipt the pipeline consumes.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
    pub logs: Vec<Log>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    Idle,
    ApprovingSwap,
    ResolvingPool,
    BuildingParams,
    Swapping,
    SupplyingCollateral,
    Borrowing,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::ApprovingSwap => "approving_swap",
            PipelineStage::ResolvingPool => "resolving_pool",
            PipelineStage::BuildingParams => "building_params",
            PipelineStage::Swapping => "swapping",
            PipelineStage::SupplyingCollateral => "supplying_collateral",
            PipelineStage::Borrowing => "borrowing",
            PipelineStage::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub stage: PipelineStage,
    pub tx_hashes: Vec<String>,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Running,
    Done,
    Failed { stage: PipelineStage, error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub id: String,
    pub network: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub input_symbol: String,
    pub input_amount: Decimal,
    pub pool: Option<String>,
    pub amount_out: Option<Decimal>,
    pub supplied: Option<Decimal>,
    pub borrowed: Option<Decimal>,
    pub steps: Vec<StepRecord>,
    pub outcome: PipelineOutcome,
}

impl PipelineReport {
    pub fn new(network: &str, input_symbol: &str, input_amount: Decimal) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            network: network.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            input_symbol: input_symbol.to_string(),
            input_amount,
            pool: None,
            amount_out: None,
            supplied: None,
            borrowed: None,
            steps: Vec::new(),
            outcome: PipelineOutcome::Running,
        }
    }

    pub fn record(&mut self, stage: PipelineStage, tx_hashes: Vec<TxHash>, detail: impl Into<String>) {
        self.steps.push(StepRecord {
            stage,
            tx_hashes: tx_hashes.iter().map(|h| format!("{h:?}")).collect(),
            detail: detail.into(),
        });
    }

    pub fn completed_stages(&self) -> Vec<PipelineStage> {
        self.steps.iter().map(|s| s.stage).collect()
    }

    pub fn is_done(&self) -> bool {
        self.outcome == PipelineOutcome::Done
    }

    pub fn failed_stage(&self) -> Option<PipelineStage> {
        match &self.outcome {
            PipelineOutcome::Failed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
