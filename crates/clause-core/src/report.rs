//! Reconciliation report types
//!
//! The report is what a pass hands back to its caller: the decisions keyed
//! by tag, per-state counts, and any notices raised along the way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::{ClassificationMode, DecisionSet, RegionDecision};

/// Overall compliance of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// No managed regions were found
    Empty,
    /// Every managed region matches its baseline
    Compliant,
    /// Some regions carry pending insertions, nothing needs review
    Drifted,
    /// At least one region changed with no pending edit to explain it
    NeedsReview,
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub mode: ClassificationMode,
    pub verified: usize,
    pub drifted: usize,
    pub fallback: usize,
    /// Decision per distinct tag
    pub decisions: BTreeMap<String, RegionDecision>,
    /// Non-fatal conditions, e.g. running without edit tracking
    pub notices: Vec<String>,
}

impl ReconciliationReport {
    pub fn new(mode: ClassificationMode, set: DecisionSet, notices: Vec<String>) -> Self {
        Self {
            mode,
            verified: set.verified,
            drifted: set.drifted,
            fallback: set.fallback,
            decisions: set.decisions,
            notices,
        }
    }

    /// Number of managed regions classified
    pub fn total(&self) -> usize {
        self.verified + self.drifted + self.fallback
    }

    /// Collapse the counts into one status.
    ///
    /// NeedsReview > Drifted > Compliant; Empty when nothing was classified.
    pub fn status(&self) -> ComplianceStatus {
        if self.total() == 0 {
            ComplianceStatus::Empty
        } else if self.fallback > 0 {
            ComplianceStatus::NeedsReview
        } else if self.drifted > 0 {
            ComplianceStatus::Drifted
        } else {
            ComplianceStatus::Compliant
        }
    }

    /// Single-line summary for the caller to display.
    pub fn summary(&self) -> String {
        if self.total() == 0 {
            return "No managed regions found".to_string();
        }
        let noun = if self.total() == 1 { "region" } else { "regions" };
        format!(
            "{} managed {}: {} verified, {} drifted (pending insertions), {} needs review",
            self.total(),
            noun,
            self.verified,
            self.drifted,
            self.fallback
        )
    }
}
