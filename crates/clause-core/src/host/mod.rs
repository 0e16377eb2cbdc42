//! The document host seam.
//!
//! A host is the live editor holding the document. It works in batches:
//! writes are queued and take effect on [`DocumentHost::commit`], and every
//! handle issued before a commit is invalid afterwards. The driver therefore
//! never carries a handle across a commit; it re-enumerates regions and joins
//! on the tag string instead.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::{MemoryChange, MemoryDocument, MemoryHost, MemoryRegion};

/// Result type for host interactions
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failures reported by a host
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host (or one of its APIs) cannot be reached
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    /// A handle issued before the last commit was used
    #[error("Stale {kind} handle used after commit")]
    StaleHandle { kind: &'static str },

    /// A handle that the host never issued
    #[error("Unknown {kind} handle")]
    UnknownHandle { kind: &'static str },

    /// Committing a batch failed
    #[error("Host transaction failed: {0}")]
    Transaction(String),
}

/// Abstract highlight values; the host maps them onto its own palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Not part of any recognized approved region
    Unmanaged,
    /// Matches the approved baseline
    Verified,
    /// Diverges from the approved baseline
    Drifted,
}

/// What the host can do beyond plain reads and highlight writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// Whether per-region edit-tracking records can be read
    pub change_tracking: bool,
}

/// Opaque handle to a tagged region, valid until the next commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionHandle {
    generation: u64,
    slot: usize,
}

impl RegionHandle {
    pub fn new(generation: u64, slot: usize) -> Self {
        Self { generation, slot }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Opaque handle to a text range inside a region, valid until the next commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtentHandle {
    generation: u64,
    region: usize,
    slot: usize,
}

impl ExtentHandle {
    pub fn new(generation: u64, region: usize, slot: usize) -> Self {
        Self {
            generation,
            region,
            slot,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn region(&self) -> usize {
        self.region
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// A region carrying a tag, as enumerated by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRegion {
    pub handle: RegionHandle,
    /// Raw tag string; may belong to another tool entirely
    pub tag: String,
}

/// Kind of an edit-tracking record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    Insertion,
    Deletion,
    /// Formatting and other non-text changes
    Other,
}

/// One pending edit overlapping a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedChangeRecord {
    pub change_type: ChangeType,
    pub extent: ExtentHandle,
}

/// Batched access to a live document
#[async_trait]
pub trait DocumentHost: Send {
    /// Query optional capabilities.
    ///
    /// An error means the host could not answer; callers treat it as "no
    /// change tracking".
    fn capabilities(&self) -> HostResult<HostCapabilities>;

    /// Enumerate every tagged region in document order.
    async fn tagged_regions(&mut self) -> HostResult<Vec<TaggedRegion>>;

    /// Current text of a region.
    async fn region_text(&mut self, region: &RegionHandle) -> HostResult<String>;

    /// Pending edit-tracking records overlapping a region.
    async fn tracked_changes(&mut self, region: &RegionHandle) -> HostResult<Vec<TrackedChangeRecord>>;

    /// Queue a highlight over the whole document; `None` clears all highlights.
    fn mark_document(&mut self, marker: Option<Marker>);

    /// Queue a highlight over a whole region.
    fn mark_region(&mut self, region: &RegionHandle, marker: Marker);

    /// Queue a highlight over a sub-range of a region.
    fn mark_extent(&mut self, extent: &ExtentHandle, marker: Marker);

    /// Apply queued writes in order. Invalidates every outstanding handle.
    async fn commit(&mut self) -> HostResult<()>;
}
