//! Reset command implementation

use std::path::Path;

use clause_core::{MemoryHost, ReconciliationDriver};
use colored::Colorize;

use super::document;
use crate::error::Result;

/// Run the reset command
pub async fn run_reset(path: &Path) -> Result<()> {
    let mut host = MemoryHost::new(document::load(path)?);
    ReconciliationDriver::default().reset(&mut host).await?;
    document::save(path, host.document())?;

    println!("{} {}", "Cleared highlights in".green(), path.display());
    Ok(())
}
