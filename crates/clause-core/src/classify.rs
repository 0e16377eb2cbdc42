//! Region classification
//!
//! Two questions decide a region's state: does the fingerprint match the
//! baseline, and if not, do pending insertions explain the difference?
//!
//! | match | pending insertions | state             | region marker | insertion overlay |
//! |-------|--------------------|-------------------|---------------|-------------------|
//! | yes   | any                | `Verified`        | Verified      | no                |
//! | no    | at least one       | `Drifted`         | Verified      | yes               |
//! | no    | none or unknown    | `DriftedFallback` | Drifted       | no                |

use clause_content::fingerprint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::host::Marker;
use crate::snapshot::RegionSnapshot;

/// Compliance state of one managed region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceState {
    /// Content matches the approved baseline
    Verified,
    /// Content differs, and the difference is pending inserted text
    Drifted,
    /// Content differs with nothing pending to explain it; needs review
    DriftedFallback,
}

/// How regions were classified during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Edit tracking available: three states with insertion overlay
    Tracked,
    /// Edit tracking unavailable: match is verified, anything else is fallback
    TwoState,
}

/// Outcome of classifying one region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDecision {
    pub state: ComplianceState,
    /// Whether pending insertions get the drift marker
    pub overlay_insertions: bool,
}

impl RegionDecision {
    pub fn verified() -> Self {
        Self {
            state: ComplianceState::Verified,
            overlay_insertions: false,
        }
    }

    pub fn drifted() -> Self {
        Self {
            state: ComplianceState::Drifted,
            overlay_insertions: true,
        }
    }

    pub fn fallback() -> Self {
        Self {
            state: ComplianceState::DriftedFallback,
            overlay_insertions: false,
        }
    }

    /// Marker painted over the whole region.
    ///
    /// A `Drifted` region keeps the baseline marker; only its insertions
    /// are flagged.
    pub fn region_marker(&self) -> Marker {
        match self.state {
            ComplianceState::Verified | ComplianceState::Drifted => Marker::Verified,
            ComplianceState::DriftedFallback => Marker::Drifted,
        }
    }
}

/// Classify one snapshot.
///
/// A missing baseline never matches. When `insertion_count` is `None` the
/// result is the two-state classification.
pub fn classify(snapshot: &RegionSnapshot) -> RegionDecision {
    let expected = snapshot.parsed_tag.baseline_fingerprint();
    let actual = fingerprint(&snapshot.normalized_text);
    let is_match = !expected.is_empty() && actual == expected;

    if is_match {
        return RegionDecision::verified();
    }
    match snapshot.insertion_count {
        Some(n) if n > 0 => RegionDecision::drifted(),
        _ => RegionDecision::fallback(),
    }
}

/// Decisions for every managed tag seen in one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSet {
    pub decisions: BTreeMap<String, RegionDecision>,
    /// Region counts per state (a tag shared by two regions counts twice)
    pub verified: usize,
    pub drifted: usize,
    pub fallback: usize,
}

impl DecisionSet {
    /// Classify every snapshot. Pure; no host interaction.
    ///
    /// Regions sharing an identical tag string share one entry; the last
    /// snapshot for a tag decides it.
    pub fn decide(snapshots: &[RegionSnapshot]) -> Self {
        let mut set = Self::default();
        for snapshot in snapshots {
            let decision = classify(snapshot);
            debug!(
                tag = %snapshot.tag,
                state = ?decision.state,
                insertions = ?snapshot.insertion_count,
                "Classified region"
            );
            match decision.state {
                ComplianceState::Verified => set.verified += 1,
                ComplianceState::Drifted => set.drifted += 1,
                ComplianceState::DriftedFallback => set.fallback += 1,
            }
            set.decisions.insert(snapshot.tag.clone(), decision);
        }
        set
    }

    pub fn get(&self, tag: &str) -> Option<&RegionDecision> {
        self.decisions.get(tag)
    }

    /// Whether any decision asks for the insertion overlay pass.
    pub fn needs_overlay(&self) -> bool {
        self.decisions.values().any(|d| d.overlay_insertions)
    }

    /// Number of regions classified.
    pub fn total(&self) -> usize {
        self.verified + self.drifted + self.fallback
    }
}
