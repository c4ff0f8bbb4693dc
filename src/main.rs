//! Swap → supply → borrow pipeline - Main Entry Point
//!
//! Usage: `swap-supply-borrow [AMOUNT]` where AMOUNT is in input-token units.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use swap_supply_borrow::*;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    // Load configuration
    let config = Config::load()?;
    let amount = match std::env::args().nth(1) {
        Some(arg) => Decimal::from_str(arg.trim())
            .with_context(|| format!("invalid swap amount argument '{}'", arg))?,
        None => config.swap_amount,
    };
    if amount <= Decimal::ZERO {
        return Err(anyhow::anyhow!("Swap amount must be positive, got {}", amount));
    }

    info!("🔁 Swap → Supply → Borrow v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Network: {} (chain {})", config.network, config.chain_id);
    info!("   Swap Amount: {}", amount);
    info!("   Pool Fee Tier: {}", config.pool_fee_tier);
    match config.slippage_tolerance_bps {
        Some(bps) => info!("   Slippage Tolerance: {} bps", bps),
        None => info!("   Slippage Tolerance: disabled"),
    }
    info!("   Output Strategy: {:?}", config.output_strategy);
    info!("   Borrow: {} × {:?}", config.borrow_ratio, config.borrow_sizing);
    info!("   Confirmation Timeout: {}s", config.confirmation_timeout_secs);
    info!("   ⚠️  TESTNET MODE - transactions are signed and submitted");

    let ledger = network::setup_provider(&config).await?;
    let ctx = ExecutionContext::from_config(Arc::new(ledger), &config);

    let report = Pipeline::new(&ctx).run(amount).await;

    utils::print_pipeline_report(&report, &config.explorer_url);
    if let Err(e) = storage::save_pipeline_report(&report) {
        error!("Failed to save pipeline report: {}", e);
    }

    match report.outcome {
        PipelineOutcome::Failed { stage, error } => {
            Err(anyhow::anyhow!("Pipeline failed at {}: {}", stage, error))
        }
        _ => Ok(()),
    }
}
