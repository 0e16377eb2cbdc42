//! Inspect command implementation

use clause_content::decode;
use colored::Colorize;

use crate::error::Result;

/// Run the inspect command
pub fn run_inspect(raw: &str) -> Result<()> {
    let Some(tag) = decode(raw) else {
        println!("{}", "not managed".dimmed());
        return Ok(());
    };

    let fingerprint = if tag.has_baseline() {
        tag.baseline_fingerprint().normal()
    } else {
        "(none)".yellow()
    };

    println!("{}:     {}", "Kind".dimmed(), tag.kind().as_str().cyan());
    println!("{}:   {}", "Clause".dimmed(), tag.clause_id());
    println!("{}:  {}", "Version".dimmed(), tag.version());
    println!("{}: {}", "Baseline".dimmed(), fingerprint);
    Ok(())
}
