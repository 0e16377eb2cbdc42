//! Tag command implementation

use std::path::Path;

use clause_catalog::{BaselineRecord, Catalog};
use clause_content::encode;

use crate::error::{CliError, Result};

/// Run the tag command
pub fn run_tag(
    clause_id: &str,
    index_path: &Path,
    baseline_path: Option<&Path>,
    template: bool,
) -> Result<()> {
    let catalog = Catalog::parse(&std::fs::read_to_string(index_path)?)?;
    let baseline = baseline_path
        .map(|p| -> Result<BaselineRecord> { Ok(BaselineRecord::parse(&std::fs::read_to_string(p)?)?) })
        .transpose()?;

    let tag = if template {
        catalog.template_tag(clause_id, baseline.as_ref())?
    } else {
        let baseline = baseline
            .ok_or_else(|| CliError::user("--baseline is required for approved clauses"))?;
        catalog.approved_tag(clause_id, &baseline)?
    };

    println!("{}", encode(&tag));
    Ok(())
}
