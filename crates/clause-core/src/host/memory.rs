//! In-memory document host.
//!
//! Holds a [`MemoryDocument`] and implements the batched host contract
//! strictly: queued writes only land on commit, and handles from before a
//! commit are rejected. Used by the CLI over JSON documents and by tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

use super::{
    ChangeType, DocumentHost, ExtentHandle, HostCapabilities, HostError, HostResult, Marker,
    RegionHandle, TaggedRegion, TrackedChangeRecord,
};
use crate::palette::Palette;

/// A pending edit inside a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryChange {
    pub change_type: ChangeType,
    /// Byte range within the region text
    pub range: Range<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

/// A tagged region of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    pub tag: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<MemoryChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

impl MemoryRegion {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            changes: Vec::new(),
            highlight: None,
        }
    }

    /// Insert `text` at byte offset `at` and record it as a pending insertion.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not on a char boundary, like [`String::insert_str`].
    pub fn insert_tracked(&mut self, at: usize, text: &str) {
        self.text.insert_str(at, text);
        let len = text.len();
        for change in &mut self.changes {
            if change.range.start >= at {
                change.range.start += len;
                change.range.end += len;
            } else if change.range.end > at {
                change.range.end += len;
            }
        }
        self.changes.push(MemoryChange {
            change_type: ChangeType::Insertion,
            range: at..at + len,
            highlight: None,
        });
    }

    /// Record `range` as a pending deletion. The text stays visible until accepted.
    pub fn delete_tracked(&mut self, range: Range<usize>) {
        self.changes.push(MemoryChange {
            change_type: ChangeType::Deletion,
            range,
            highlight: None,
        });
    }

    /// Replace the text without leaving any tracking record.
    pub fn edit_untracked(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.changes.clear();
    }

    /// Fold pending changes into the permanent text and drop their records.
    pub fn accept_all_changes(&mut self) {
        let mut deletions: Vec<Range<usize>> = self
            .changes
            .iter()
            .filter(|c| c.change_type == ChangeType::Deletion)
            .map(|c| c.range.clone())
            .collect();
        deletions.sort_by(|a, b| b.start.cmp(&a.start));
        for range in deletions {
            let end = range.end.min(self.text.len());
            let start = range.start.min(end);
            self.text.replace_range(start..end, "");
        }
        self.changes.clear();
    }

    /// Text covered by pending insertions, in record order.
    pub fn inserted_text(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|c| c.change_type == ChangeType::Insertion)
            .filter_map(|c| self.text.get(c.range.clone()))
            .collect()
    }

    // A region-wide highlight covers the pending edits inside it too.
    fn paint(&mut self, color: Option<String>) {
        for change in &mut self.changes {
            change.highlight = color.clone();
        }
        self.highlight = color;
    }
}

/// A whole document: a body highlight plus its tagged regions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    /// Highlight applied to the whole body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(default)]
    pub regions: Vec<MemoryRegion>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region and return its index.
    pub fn push_region(&mut self, tag: impl Into<String>, text: impl Into<String>) -> usize {
        self.regions.push(MemoryRegion::new(tag, text));
        self.regions.len() - 1
    }

    /// Builder form of [`push_region`](Self::push_region).
    pub fn with_region(mut self, tag: impl Into<String>, text: impl Into<String>) -> Self {
        self.push_region(tag, text);
        self
    }

    pub fn region(&self, index: usize) -> Option<&MemoryRegion> {
        self.regions.get(index)
    }

    pub fn region_mut(&mut self, index: usize) -> Option<&mut MemoryRegion> {
        self.regions.get_mut(index)
    }

    pub fn accept_all_changes(&mut self) {
        for region in &mut self.regions {
            region.accept_all_changes();
        }
    }

    fn paint(&mut self, color: Option<String>) {
        // A body-wide highlight covers everything inside the body too.
        for region in &mut self.regions {
            region.paint(color.clone());
        }
        self.highlight = color;
    }
}

#[derive(Debug, Clone)]
enum PendingWrite {
    Document(Option<Marker>),
    Region(RegionHandle, Marker),
    Extent(ExtentHandle, Marker),
}

/// Host over a [`MemoryDocument`]
#[derive(Debug, Clone)]
pub struct MemoryHost {
    document: MemoryDocument,
    palette: Palette,
    accepted_colors: Vec<String>,
    change_tracking: bool,
    capabilities_error: Option<String>,
    fail_commit: Option<usize>,
    fail_read: Option<usize>,
    generation: u64,
    commits: usize,
    reads: usize,
    pending: Vec<PendingWrite>,
}

impl MemoryHost {
    /// Host with change tracking and the default palette.
    pub fn new(document: MemoryDocument) -> Self {
        Self {
            document,
            palette: Palette::default(),
            accepted_colors: Vec::new(),
            change_tracking: true,
            capabilities_error: None,
            fail_commit: None,
            fail_read: None,
            generation: 0,
            commits: 0,
            reads: 0,
            pending: Vec::new(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Restrict the colours this host accepts.
    pub fn with_accepted_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Advertise (or hide) the edit-tracking read API.
    pub fn with_change_tracking(mut self, enabled: bool) -> Self {
        self.change_tracking = enabled;
        self
    }

    /// Make the capability query itself fail.
    pub fn with_capabilities_error(mut self, message: impl Into<String>) -> Self {
        self.capabilities_error = Some(message.into());
        self
    }

    /// Make the `n`-th commit (1-based, counted from now) fail.
    pub fn with_failing_commit(mut self, n: usize) -> Self {
        self.fail_commit = Some(self.commits + n);
        self
    }

    /// Make the `n`-th read (1-based, counted from now) fail.
    ///
    /// Reads are `tagged_regions`, `region_text` and `tracked_changes` calls.
    pub fn with_failing_read(mut self, n: usize) -> Self {
        self.fail_read = Some(self.reads + n);
        self
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut MemoryDocument {
        &mut self.document
    }

    pub fn into_document(self) -> MemoryDocument {
        self.document
    }

    /// Number of successful commits so far.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Colour this host writes for a marker.
    pub fn color(&self, marker: Marker) -> String {
        self.palette.resolve(marker, &self.accepted_colors)
    }

    /// Number of read calls so far, failed ones included.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of writes queued for the next commit.
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    fn begin_read(&mut self) -> HostResult<()> {
        self.reads += 1;
        if self.fail_read == Some(self.reads) {
            self.fail_read = None;
            return Err(HostError::Transaction(
                "the document could not be read".to_string(),
            ));
        }
        Ok(())
    }

    /// A failed read aborts the batch it belongs to.
    fn finish_read<T>(&mut self, result: HostResult<T>) -> HostResult<T> {
        if result.is_err() && !self.pending.is_empty() {
            debug!(dropped = self.pending.len(), "Read failed; discarding queued writes");
            self.pending.clear();
        }
        result
    }

    fn read_tagged_regions(&mut self) -> HostResult<Vec<TaggedRegion>> {
        self.begin_read()?;
        Ok(self
            .document
            .regions
            .iter()
            .enumerate()
            .map(|(slot, region)| TaggedRegion {
                handle: RegionHandle::new(self.generation, slot),
                tag: region.tag.clone(),
            })
            .collect())
    }

    fn read_region_text(&mut self, region: &RegionHandle) -> HostResult<String> {
        self.begin_read()?;
        let slot = self.check_region(region)?;
        Ok(self.document.regions[slot].text.clone())
    }

    fn read_tracked_changes(&mut self, region: &RegionHandle) -> HostResult<Vec<TrackedChangeRecord>> {
        self.begin_read()?;
        if !self.change_tracking {
            return Err(HostError::Unavailable("change tracking is not supported".to_string()));
        }
        let slot = self.check_region(region)?;
        Ok(self.document.regions[slot]
            .changes
            .iter()
            .enumerate()
            .map(|(index, change)| TrackedChangeRecord {
                change_type: change.change_type,
                extent: ExtentHandle::new(self.generation, slot, index),
            })
            .collect())
    }

    fn check_region(&self, handle: &RegionHandle) -> HostResult<usize> {
        if handle.generation() != self.generation {
            return Err(HostError::StaleHandle { kind: "region" });
        }
        if handle.slot() >= self.document.regions.len() {
            return Err(HostError::UnknownHandle { kind: "region" });
        }
        Ok(handle.slot())
    }

    fn check_extent(&self, handle: &ExtentHandle) -> HostResult<(usize, usize)> {
        if handle.generation() != self.generation {
            return Err(HostError::StaleHandle { kind: "extent" });
        }
        let changes = self
            .document
            .regions
            .get(handle.region())
            .map(|r| r.changes.len())
            .unwrap_or(0);
        if handle.slot() >= changes {
            return Err(HostError::UnknownHandle { kind: "extent" });
        }
        Ok((handle.region(), handle.slot()))
    }
}

#[async_trait]
impl DocumentHost for MemoryHost {
    fn capabilities(&self) -> HostResult<HostCapabilities> {
        if let Some(message) = &self.capabilities_error {
            return Err(HostError::Unavailable(message.clone()));
        }
        Ok(HostCapabilities {
            change_tracking: self.change_tracking,
        })
    }

    async fn tagged_regions(&mut self) -> HostResult<Vec<TaggedRegion>> {
        let result = self.read_tagged_regions();
        self.finish_read(result)
    }

    async fn region_text(&mut self, region: &RegionHandle) -> HostResult<String> {
        let result = self.read_region_text(region);
        self.finish_read(result)
    }

    async fn tracked_changes(&mut self, region: &RegionHandle) -> HostResult<Vec<TrackedChangeRecord>> {
        let result = self.read_tracked_changes(region);
        self.finish_read(result)
    }

    fn mark_document(&mut self, marker: Option<Marker>) {
        self.pending.push(PendingWrite::Document(marker));
    }

    fn mark_region(&mut self, region: &RegionHandle, marker: Marker) {
        self.pending.push(PendingWrite::Region(*region, marker));
    }

    fn mark_extent(&mut self, extent: &ExtentHandle, marker: Marker) {
        self.pending.push(PendingWrite::Extent(*extent, marker));
    }

    async fn commit(&mut self) -> HostResult<()> {
        let pending = std::mem::take(&mut self.pending);

        if self.fail_commit == Some(self.commits + 1) {
            self.fail_commit = None;
            self.generation += 1;
            return Err(HostError::Transaction(
                "the document changed while the batch was pending".to_string(),
            ));
        }

        // Validate the whole batch before touching the document.
        for write in &pending {
            match write {
                PendingWrite::Document(_) => {}
                PendingWrite::Region(handle, _) => {
                    self.check_region(handle)?;
                }
                PendingWrite::Extent(handle, _) => {
                    self.check_extent(handle)?;
                }
            }
        }

        let writes = pending.len();
        for write in pending {
            match write {
                PendingWrite::Document(marker) => {
                    let color = marker.map(|m| self.color(m));
                    self.document.paint(color);
                }
                PendingWrite::Region(handle, marker) => {
                    let color = self.color(marker);
                    self.document.regions[handle.slot()].paint(Some(color));
                }
                PendingWrite::Extent(handle, marker) => {
                    let color = self.color(marker);
                    self.document.regions[handle.region()].changes[handle.slot()].highlight =
                        Some(color);
                }
            }
        }

        self.generation += 1;
        self.commits += 1;
        debug!(writes, commit = self.commits, "Committed host batch");
        Ok(())
    }
}
