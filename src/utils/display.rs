//! Display and printing utilities

use tracing::{error, info};
use crate::types::{PipelineOutcome, PipelineReport};

/// Keeps the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

pub fn tx_link(explorer_url: &str, tx_hash: &str) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), tx_hash)
}

pub fn print_pipeline_report(report: &PipelineReport, explorer_url: &str) {
    info!("\n📊 Pipeline run {} on {}", report.id, report.network);
    info!("   Input: {} {}", report.input_amount, report.input_symbol);
    if let Some(pool) = &report.pool {
        info!("   Pool: {}", pool);
    }
    if let Some(out) = report.amount_out {
        info!("   Swap output: {}", out);
    }
    if let Some(supplied) = report.supplied {
        info!("   Supplied collateral: {}", supplied);
    }
    if let Some(borrowed) = report.borrowed {
        info!("   Borrowed: {}", borrowed);
    }

    info!("   Completed steps:");
    for step in &report.steps {
        info!("     ✅ {} - {}", step.stage, step.detail);
        for hash in &step.tx_hashes {
            info!("        {}", tx_link(explorer_url, hash));
        }
    }

    match &report.outcome {
        PipelineOutcome::Done => info!("   Outcome: DONE"),
        PipelineOutcome::Failed { stage, error: cause } => {
            error!("   Outcome: FAILED at {} - {}", stage, cause);
            error!("   No rollback performed; completed steps above remain on-chain");
        }
        PipelineOutcome::Running => info!("   Outcome: still running"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_private_key() {
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let masked = mask_secret(key);
        assert_eq!(masked, "0xac…ff80");
        assert_eq!(mask_secret("short"), "*****");
    }

    #[test]
    fn builds_explorer_link() {
        assert_eq!(
            tx_link("https://sepolia.etherscan.io/", "0xabc"),
            "https://sepolia.etherscan.io/tx/0xabc"
        );
    }
}
