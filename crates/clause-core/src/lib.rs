//! Validation and reconciliation engine for Clause Guard
//!
//! Checks that tagged regions of a live document still match their approved
//! baselines and paints each one with a compliance marker:
//!
//! - **Host seam**: [`DocumentHost`], a batched read/queue/commit interface
//!   to the editor, with [`MemoryHost`] as an in-memory implementation
//! - **Classification**: fingerprint comparison combined with pending
//!   insertions from the editor's edit tracking
//! - **Driver**: the snapshot / decide / apply pass and the reset operation
//! - **Configuration**: palette and reconciliation options from `clause.toml`
//!
//! # Architecture
//!
//! ```text
//!            CLI / editor add-in
//!                    |
//!               clause-core
//!                    |
//!        +-----------+-----------+
//!        |                       |
//!  clause-content          clause-catalog
//! ```
//!
//! # Example
//!
//! ```
//! use clause_core::{ComplianceState, MemoryDocument, MemoryHost, ReconciliationDriver};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> clause_core::Result<()> {
//! let document = MemoryDocument::new().with_region("Template|MISC-9|v1|h", "Notices by email.");
//! let mut host = MemoryHost::new(document);
//!
//! let report = ReconciliationDriver::default().validate(&mut host).await?;
//!
//! let decision = report.decisions["Template|MISC-9|v1|h"];
//! assert_eq!(decision.state, ComplianceState::DriftedFallback);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod palette;
pub mod report;
pub mod snapshot;

pub use classify::{ClassificationMode, ComplianceState, DecisionSet, RegionDecision, classify};
pub use config::{CONFIG_FILE, EngineConfig, ReconciliationSection};
pub use driver::ReconciliationDriver;
pub use error::{Error, Phase, Result};
pub use host::{
    ChangeType, DocumentHost, ExtentHandle, HostCapabilities, HostError, HostResult, Marker,
    MemoryChange, MemoryDocument, MemoryHost, MemoryRegion, RegionHandle, TaggedRegion,
    TrackedChangeRecord,
};
pub use palette::Palette;
pub use report::{ComplianceStatus, ReconciliationReport};
pub use snapshot::RegionSnapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_host_transaction_displays_phase_and_cause() {
        let error = Error::HostTransaction {
            phase: Phase::Apply,
            source: HostError::Transaction("GeneralException".to_string()),
        };

        let display = format!("{}", error);
        assert!(
            display.contains("apply") && display.contains("GeneralException"),
            "Error display should name the phase and the host message, got: {}",
            display
        );
    }
}
