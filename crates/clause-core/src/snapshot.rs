//! Immutable per-region input to classification

use clause_content::{RegionTag, normalize};

use crate::host::{ChangeType, TrackedChangeRecord};

/// A managed region as read during the snapshot phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSnapshot {
    /// Raw tag string, the join key for the apply phase
    pub tag: String,
    pub parsed_tag: RegionTag,
    pub normalized_text: String,
    /// Pending insertions overlapping the region; `None` when edit tracking
    /// could not be read for this pass
    pub insertion_count: Option<usize>,
}

impl RegionSnapshot {
    /// Capture a region, normalizing its text.
    pub fn capture(
        tag: impl Into<String>,
        parsed_tag: RegionTag,
        text: &str,
        changes: Option<&[TrackedChangeRecord]>,
    ) -> Self {
        Self {
            tag: tag.into(),
            parsed_tag,
            normalized_text: normalize(text),
            insertion_count: changes.map(count_insertions),
        }
    }
}

/// Number of insertion records; deletions and other changes never count.
pub fn count_insertions(changes: &[TrackedChangeRecord]) -> usize {
    changes
        .iter()
        .filter(|c| c.change_type == ChangeType::Insertion)
        .count()
}
