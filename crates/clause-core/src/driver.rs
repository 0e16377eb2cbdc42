//! ReconciliationDriver implementation
//!
//! One validation pass runs three phases:
//!
//! 1. **snapshot** (host batch): paint the document unmanaged, read the text
//!    and edit-tracking records of every managed region, commit
//! 2. **decide** (pure): normalize, fingerprint, and classify each snapshot
//! 3. **apply** (host batch, plus an optional second batch): re-enumerate
//!    regions, join decisions by tag string, paint region markers; then paint
//!    pending insertions of drifted regions
//!
//! Nothing computed in phase 2 ever runs while host writes are queued, and no
//! handle survives a commit.

use clause_content::decode;
use tracing::{debug, info, warn};

use crate::classify::{ClassificationMode, DecisionSet};
use crate::config::EngineConfig;
use crate::error::{Error, Phase, Result};
use crate::host::{ChangeType, DocumentHost, HostResult, Marker};
use crate::report::ReconciliationReport;
use crate::snapshot::RegionSnapshot;

/// Runs validation and reset passes against a document host
///
/// Taking the host by `&mut` means one pass at a time per host.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationDriver {
    config: EngineConfig,
}

impl ReconciliationDriver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a full validation pass.
    ///
    /// # Errors
    ///
    /// [`Error::HostTransaction`] if any host interaction fails. The pass
    /// stops at that point; markers committed by earlier batches remain.
    pub async fn validate<H>(&self, host: &mut H) -> Result<ReconciliationReport>
    where
        H: DocumentHost + ?Sized,
    {
        let (mode, notices) = self.classification_mode(host);
        info!(?mode, "Starting validation pass");

        let snapshots = self
            .snapshot(host, mode)
            .await
            .map_err(Error::host(Phase::Snapshot))?;

        let decisions = DecisionSet::decide(&snapshots);
        drop(snapshots);

        self.apply(host, &decisions)
            .await
            .map_err(Error::host(Phase::Apply))?;

        if mode == ClassificationMode::Tracked && decisions.needs_overlay() {
            self.overlay(host, &decisions)
                .await
                .map_err(Error::host(Phase::Overlay))?;
        }

        let report = ReconciliationReport::new(mode, decisions, notices);
        info!(
            verified = report.verified,
            drifted = report.drifted,
            fallback = report.fallback,
            "Validation pass complete"
        );
        Ok(report)
    }

    /// Clear every marker in the document.
    pub async fn reset<H>(&self, host: &mut H) -> Result<()>
    where
        H: DocumentHost + ?Sized,
    {
        host.mark_document(None);
        host.commit().await.map_err(Error::host(Phase::Reset))?;
        info!("Cleared all markers");
        Ok(())
    }

    /// Decide between three-state and two-state classification.
    fn classification_mode<H>(&self, host: &H) -> (ClassificationMode, Vec<String>)
    where
        H: DocumentHost + ?Sized,
    {
        if !self.config.reconciliation.change_tracking {
            let notice = "Change tracking disabled by configuration; using two-state validation";
            info!("{}", notice);
            return (ClassificationMode::TwoState, vec![notice.to_string()]);
        }

        match host.capabilities() {
            Ok(caps) if caps.change_tracking => (ClassificationMode::Tracked, Vec::new()),
            Ok(_) => {
                let notice = "Host does not support change tracking; using two-state validation";
                warn!("{}", notice);
                (ClassificationMode::TwoState, vec![notice.to_string()])
            }
            Err(e) => {
                let notice = format!(
                    "Host capabilities unavailable ({}); using two-state validation",
                    e
                );
                warn!("{}", notice);
                (ClassificationMode::TwoState, vec![notice])
            }
        }
    }

    async fn snapshot<H>(&self, host: &mut H, mode: ClassificationMode) -> HostResult<Vec<RegionSnapshot>>
    where
        H: DocumentHost + ?Sized,
    {
        host.mark_document(Some(Marker::Unmanaged));

        let mut snapshots = Vec::new();
        for region in host.tagged_regions().await? {
            let Some(parsed) = decode(&region.tag) else {
                continue;
            };
            let text = host.region_text(&region.handle).await?;
            let changes = match mode {
                ClassificationMode::Tracked => Some(host.tracked_changes(&region.handle).await?),
                ClassificationMode::TwoState => None,
            };
            snapshots.push(RegionSnapshot::capture(
                region.tag,
                parsed,
                &text,
                changes.as_deref(),
            ));
        }

        host.commit().await?;
        debug!(regions = snapshots.len(), "Snapshot committed");
        Ok(snapshots)
    }

    async fn apply<H>(&self, host: &mut H, decisions: &DecisionSet) -> HostResult<()>
    where
        H: DocumentHost + ?Sized,
    {
        for region in host.tagged_regions().await? {
            match decisions.get(&region.tag) {
                Some(decision) => host.mark_region(&region.handle, decision.region_marker()),
                None if decode(&region.tag).is_some() => {
                    // Appeared after the snapshot; keep the unmanaged marker.
                    debug!(tag = %region.tag, "No decision for managed region");
                }
                None => {}
            }
        }
        host.commit().await
    }

    async fn overlay<H>(&self, host: &mut H, decisions: &DecisionSet) -> HostResult<()>
    where
        H: DocumentHost + ?Sized,
    {
        let mut marked = 0usize;
        for region in host.tagged_regions().await? {
            if !decisions
                .get(&region.tag)
                .is_some_and(|d| d.overlay_insertions)
            {
                continue;
            }
            for change in host.tracked_changes(&region.handle).await? {
                if change.change_type == ChangeType::Insertion {
                    host.mark_extent(&change.extent, Marker::Drifted);
                    marked += 1;
                }
            }
        }
        host.commit().await?;
        debug!(insertions = marked, "Insertion overlay committed");
        Ok(())
    }
}
