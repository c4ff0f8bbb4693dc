//! Pipeline run report storage

use anyhow::Result;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::types::PipelineReport;
use crate::utils::RUNS_DIR;

pub fn save_pipeline_report(report: &PipelineReport) -> Result<PathBuf> {
    save_pipeline_report_in(Path::new(RUNS_DIR), report)
}

/// Appends `report` as one JSON line to the day's run file in `dir`.
pub fn save_pipeline_report_in(dir: &Path, report: &PipelineReport) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let filename = dir.join(format!("pipeline_{}.jsonl",
        Utc::now().format("%Y-%m-%d")));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)?;

    writeln!(file, "{}", serde_json::to_string(report)?)?;

    info!(
        run_id = %report.id,
        outcome = ?report.outcome,
        steps = report.steps.len(),
        "Saved pipeline report"
    );

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PipelineOutcome, PipelineStage};
    use alloy::primitives::TxHash;
    use rust_decimal::Decimal;

    #[test]
    fn appends_one_line_per_run() {
        let dir = std::env::temp_dir().join(format!("ssb-runs-{}", uuid::Uuid::new_v4()));

        let mut report = PipelineReport::new("sepolia", "USDC", Decimal::ONE);
        report.record(PipelineStage::ApprovingSwap, vec![TxHash::repeat_byte(0x01)], "approved");
        report.outcome = PipelineOutcome::Failed {
            stage: PipelineStage::ResolvingPool,
            error: "Pool not found".to_string(),
        };

        let path = save_pipeline_report_in(&dir, &report).unwrap();
        save_pipeline_report_in(&dir, &report).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["outcome"]["status"], "failed");
        assert_eq!(parsed["outcome"]["stage"], "ResolvingPool");
        assert_eq!(parsed["steps"][0]["tx_hashes"].as_array().unwrap().len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
