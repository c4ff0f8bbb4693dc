//! Pipeline controller: approve → resolve pool → build params → swap →
//! supply → borrow

use alloy::primitives::U256;
use rust_decimal::Decimal;
use tracing::{error, info};
use crate::{
    errors::{BotError, BotResult},
    execution::{
        ExecutionContext, amount_out_minimum, borrow, borrow_amount, build_swap_params,
        execute_swap, supply_collateral,
    },
    pools::get_pool_info,
    tokens::approve_token,
    types::{PipelineOutcome, PipelineReport, PipelineStage},
    utils::{from_base_units, parse_units},
};

/// Runs the fixed step sequence once. Each step waits for its transactions
/// to confirm before the next starts; the first failure ends the run and
/// nothing already done is undone.
pub struct Pipeline<'a> {
    ctx: &'a ExecutionContext,
    stage: PipelineStage,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: &'a ExecutionContext) -> Self {
        Self {
            ctx,
            stage: PipelineStage::Idle,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    fn advance(&mut self, next: PipelineStage) {
        info!(from = %self.stage, to = %next, "➡️  Pipeline stage");
        self.stage = next;
    }

    pub async fn run(&mut self, amount: Decimal) -> PipelineReport {
        let input = self.ctx.route.input;
        let mut report = PipelineReport::new(&self.ctx.network, input.symbol, amount);

        info!(
            run_id = %report.id,
            "🚀 Starting pipeline: {} {} → {} → borrow {}",
            amount,
            input.symbol,
            self.ctx.route.collateral.symbol,
            self.ctx.route.debt.symbol
        );

        match self.execute(amount, &mut report).await {
            Ok(()) => {
                self.advance(PipelineStage::Done);
                report.outcome = PipelineOutcome::Done;
                info!(run_id = %report.id, "🎉 Pipeline completed");
            }
            Err(e) => {
                error!(
                    run_id = %report.id,
                    stage = %self.stage,
                    completed = report.steps.len(),
                    "❌ Pipeline failed: {}",
                    e
                );
                report.outcome = PipelineOutcome::Failed {
                    stage: self.stage,
                    error: e.to_string(),
                };
            }
        }

        report.finished_at = Some(chrono::Utc::now());
        report
    }

    async fn execute(&mut self, amount: Decimal, report: &mut PipelineReport) -> BotResult<()> {
        let ctx = self.ctx;
        let route = ctx.route;
        let ledger = ctx.ledger();

        self.advance(PipelineStage::ApprovingSwap);
        let amount_str = amount.to_string();
        let approval = approve_token(
            ledger,
            route.input.address,
            &amount_str,
            route.input.decimals,
            ctx.contracts.swap_router,
        )
        .await?;
        let amount_in = parse_units(&amount_str, route.input.decimals)?;
        report.record(
            PipelineStage::ApprovingSwap,
            vec![approval.tx_hash],
            format!("approved router for {} {}", amount, route.input.symbol),
        );

        self.advance(PipelineStage::ResolvingPool);
        let pool = get_pool_info(
            ledger,
            ctx.contracts.factory,
            &route.input,
            &route.collateral,
            ctx.settings.fee_tier,
        )
        .await?;
        report.pool = Some(pool.address.to_string());
        report.record(
            PipelineStage::ResolvingPool,
            Vec::new(),
            format!("pool {} fee {}", pool.address, pool.fee),
        );

        self.advance(PipelineStage::BuildingParams);
        let minimum = amount_out_minimum(ctx, &pool, amount_in)
            .await
            .map_err(|e| e.into_step_error(|reason| BotError::SwapExecutionFailed { reason }))?;
        let params = build_swap_params(ctx, &pool, amount_in, minimum);
        report.record(
            PipelineStage::BuildingParams,
            Vec::new(),
            format!("amount_in {} min_out {}", params.amount_in, params.amount_out_minimum),
        );

        self.advance(PipelineStage::Swapping);
        let swap = execute_swap(ctx, &pool, &params).await?;
        report.amount_out = display_amount(swap.amount_out, route.collateral.decimals);
        report.record(
            PipelineStage::Swapping,
            vec![swap.receipt.tx_hash],
            format!("received {} base units of {}", swap.amount_out, route.collateral.symbol),
        );

        self.advance(PipelineStage::SupplyingCollateral);
        let supply = supply_collateral(ctx, swap.amount_out).await?;
        report.supplied = display_amount(supply.supplied, route.collateral.decimals);
        report.record(
            PipelineStage::SupplyingCollateral,
            vec![supply.approval.tx_hash, supply.receipt.tx_hash],
            format!("supplied {} base units of {}", supply.supplied, route.collateral.symbol),
        );

        self.advance(PipelineStage::Borrowing);
        let debt = route.debt;
        let borrow_raw = borrow_amount(ctx, amount_in)
            .await
            .map_err(|e| e.into_step_error(|reason| BotError::BorrowFailed { asset: debt.address, reason }))?;
        let receipt = borrow(ctx, borrow_raw).await?;
        report.borrowed = display_amount(borrow_raw, debt.decimals);
        report.record(
            PipelineStage::Borrowing,
            vec![receipt.tx_hash],
            format!("borrowed {} base units of {}", borrow_raw, debt.symbol),
        );

        Ok(())
    }
}

fn display_amount(raw: U256, decimals: u8) -> Option<Decimal> {
    from_base_units(raw, decimals).ok()
}
