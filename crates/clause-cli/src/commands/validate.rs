//! Validate command implementation

use std::path::Path;

use clause_core::{
    CONFIG_FILE, ComplianceState, ComplianceStatus, EngineConfig, MemoryHost, ReconciliationDriver,
    ReconciliationReport,
};
use colored::Colorize;

use super::document;
use crate::error::Result;

/// Run the validate command
pub async fn run_validate(
    path: &Path,
    config_path: Option<&Path>,
    write: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let document = document::load(path)?;

    let driver = ReconciliationDriver::new(config);
    let mut host = MemoryHost::new(document).with_palette(driver.config().palette.clone());
    let report = driver.validate(&mut host).await?;

    if write {
        document::save(path, host.document())?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, path, write);
    }
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => {
            let default = Path::new(CONFIG_FILE);
            if default.exists() {
                Ok(EngineConfig::load(default)?)
            } else {
                Ok(EngineConfig::default())
            }
        }
    }
}

fn print_report(report: &ReconciliationReport, path: &Path, written: bool) {
    for notice in &report.notices {
        println!("{} {}", "!".yellow().bold(), notice);
    }

    for (tag, decision) in &report.decisions {
        let state = match decision.state {
            ComplianceState::Verified => "verified".green(),
            ComplianceState::Drifted => "drifted".yellow(),
            ComplianceState::DriftedFallback => "needs review".red(),
        };
        println!("  {} {}", state, tag.as_str().dimmed());
    }

    let text = report.summary();
    let summary = match report.status() {
        ComplianceStatus::Compliant => text.as_str().green().bold(),
        ComplianceStatus::Drifted => text.as_str().yellow().bold(),
        ComplianceStatus::NeedsReview => text.as_str().red().bold(),
        ComplianceStatus::Empty => text.as_str().normal(),
    };
    println!("{}", summary);

    if written {
        println!("{} {}", "Updated".dimmed(), path.display());
    }
}
