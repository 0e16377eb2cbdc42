//! Loading and saving JSON documents

use std::path::Path;

use clause_core::MemoryDocument;

use crate::error::{CliError, Result};

pub fn load(path: &Path) -> Result<MemoryDocument> {
    if !path.exists() {
        return Err(CliError::user(format!("Document not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    let document = serde_json::from_str(&content)?;
    Ok(document)
}

pub fn save(path: &Path, document: &MemoryDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    std::fs::write(path, content + "\n")?;
    Ok(())
}
