//! Fingerprint command implementation

use std::path::Path;

use clause_content::fingerprint_text;

use crate::error::Result;

/// Run the fingerprint command
pub fn run_fingerprint(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    println!("{}", fingerprint_text(&text));
    Ok(())
}
