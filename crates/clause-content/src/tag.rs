//! Region tag codec.
//!
//! A managed region carries a tag string of the form:
//! ```text
//! Approved|NDA-1|v1|h<fingerprint>
//! ```
//! Decoding is total: anything that is not a recognized tag decodes to `None`
//! ("not managed") instead of an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Field delimiter inside a tag string.
pub const DELIMITER: char = '|';

/// Prefix marking the fingerprint segment.
pub const FINGERPRINT_PREFIX: char = 'h';

/// Which kind of managed region a tag describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    /// Template region, may be inserted without a baseline
    Template,
    /// Approved clause with a recorded baseline
    Approved,
}

impl TagKind {
    /// Canonical spelling written by [`encode`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Template => "Template",
            Self::Approved => "Approved",
        }
    }

    /// Recognize a kind segment.
    ///
    /// Accepts the canonical spelling and the upper-case spelling written by
    /// older insertion paths (`TEMPLATE`, `APPROVED`).
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "Template" | "TEMPLATE" => Some(Self::Template),
            "Approved" | "APPROVED" => Some(Self::Approved),
            _ => None,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed form of a region tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionTag {
    kind: TagKind,
    clause_id: String,
    version: String,
    baseline_fingerprint: String,
}

impl RegionTag {
    /// Build a tag from its fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if any field contains the `|` delimiter,
    /// since such a tag could not be decoded back to itself.
    pub fn new(
        kind: TagKind,
        clause_id: impl Into<String>,
        version: impl Into<String>,
        baseline_fingerprint: impl Into<String>,
    ) -> Result<Self> {
        let clause_id = check_field("clause id", clause_id.into())?;
        let version = check_field("version", version.into())?;
        let baseline_fingerprint = check_field("baseline fingerprint", baseline_fingerprint.into())?;

        Ok(Self {
            kind,
            clause_id,
            version,
            baseline_fingerprint,
        })
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn clause_id(&self) -> &str {
        &self.clause_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Expected fingerprint of the region's normalized text; empty if none was recorded.
    pub fn baseline_fingerprint(&self) -> &str {
        &self.baseline_fingerprint
    }

    /// Whether a baseline fingerprint was recorded at all.
    pub fn has_baseline(&self) -> bool {
        !self.baseline_fingerprint.is_empty()
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{kind}{d}{id}{d}{version}{d}{p}{fp}",
            kind = self.kind,
            d = DELIMITER,
            id = self.clause_id,
            version = self.version,
            p = FINGERPRINT_PREFIX,
            fp = self.baseline_fingerprint,
        )
    }
}

fn check_field(field: &'static str, value: String) -> Result<String> {
    if value.contains(DELIMITER) {
        return Err(Error::InvalidField { field, value });
    }
    Ok(value)
}

/// Decode a raw tag string.
///
/// Returns `None` when the tag is not managed by the engine: its first
/// segment is not a recognized [`TagKind`].
///
/// When there are at least two segments and the last one starts with `h`,
/// the rest of that segment is the baseline fingerprint. Of the segments in
/// between, the first is the clause id and the second the version; missing
/// ones decode as empty and extra ones are ignored.
///
/// # Example
///
/// ```
/// use clause_content::{TagKind, decode};
///
/// let tag = decode("Approved|NDA-1|v1|habc123").unwrap();
/// assert_eq!(tag.kind(), TagKind::Approved);
/// assert_eq!(tag.clause_id(), "NDA-1");
/// assert_eq!(tag.baseline_fingerprint(), "abc123");
///
/// assert!(decode("Draft|NDA-1|v1|habc123").is_none());
/// ```
pub fn decode(raw: &str) -> Option<RegionTag> {
    let segments: Vec<&str> = raw.split(DELIMITER).collect();
    let kind = TagKind::from_segment(segments[0])?;

    let mut middle = &segments[1..];
    let mut baseline_fingerprint = "";
    if let Some((last, rest)) = middle.split_last()
        && let Some(fp) = last.strip_prefix(FINGERPRINT_PREFIX)
    {
        baseline_fingerprint = fp;
        middle = rest;
    }

    Some(RegionTag {
        kind,
        clause_id: middle.first().copied().unwrap_or_default().to_string(),
        version: middle.get(1).copied().unwrap_or_default().to_string(),
        baseline_fingerprint: baseline_fingerprint.to_string(),
    })
}

/// Encode a tag as `<Kind>|<clauseId>|<version>|h<baselineFingerprint>`.
///
/// `decode(&encode(t)) == Some(t)` for every tag built through [`RegionTag::new`].
pub fn encode(tag: &RegionTag) -> String {
    tag.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn tag(kind: TagKind, id: &str, version: &str, fp: &str) -> RegionTag {
        RegionTag::new(kind, id, version, fp).unwrap()
    }

    #[test]
    fn encodes_canonical_form() {
        let t = tag(TagKind::Approved, "NDA-1", "v1", "abc123");
        assert_eq!(encode(&t), "Approved|NDA-1|v1|habc123");
    }

    #[test]
    fn encodes_empty_fingerprint_as_bare_prefix() {
        let t = tag(TagKind::Template, "MISC-9", "v1", "");
        assert_eq!(encode(&t), "Template|MISC-9|v1|h");
    }

    #[test]
    fn decodes_template_with_empty_fingerprint() {
        let t = decode("Template|MISC-9|v1|h").unwrap();
        assert_eq!(t, tag(TagKind::Template, "MISC-9", "v1", ""));
        assert!(!t.has_baseline());
    }

    #[test]
    fn decodes_legacy_uppercase_kind() {
        let t = decode("APPROVED|NDA-1|v2|hdeadbeef").unwrap();
        assert_eq!(t, tag(TagKind::Approved, "NDA-1", "v2", "deadbeef"));
        // Re-encoding writes the canonical spelling
        assert_eq!(encode(&t), "Approved|NDA-1|v2|hdeadbeef");
    }

    #[test]
    fn last_segment_without_prefix_is_not_a_fingerprint() {
        let t = decode("Approved|NDA-1|v1").unwrap();
        assert_eq!(t.clause_id(), "NDA-1");
        assert_eq!(t.version(), "v1");
        assert_eq!(t.baseline_fingerprint(), "");
    }

    #[test]
    fn extra_middle_segments_are_ignored() {
        let t = decode("Approved|NDA-1|v1|legal|habc").unwrap();
        assert_eq!(t, tag(TagKind::Approved, "NDA-1", "v1", "abc"));
    }

    #[test]
    fn bare_kind_decodes_with_empty_fields() {
        let t = decode("Approved").unwrap();
        assert_eq!(t, tag(TagKind::Approved, "", "", ""));
    }

    #[rstest]
    #[case::empty("")]
    #[case::unknown_kind("Draft|NDA-1|v1|habc")]
    #[case::lowercase_kind("approved|NDA-1|v1|habc")]
    #[case::padded_kind(" Approved|NDA-1|v1|habc")]
    #[case::foreign("repo:block:1234")]
    #[case::fingerprint_only("habc")]
    fn unrecognized_tags_are_not_managed(#[case] raw: &str) {
        assert_eq!(decode(raw), None);
    }

    #[rstest]
    #[case::clause_id("NDA|1", "v1", "abc")]
    #[case::version("NDA-1", "v|1", "abc")]
    #[case::fingerprint("NDA-1", "v1", "ab|c")]
    fn delimiter_in_field_is_rejected(#[case] id: &str, #[case] version: &str, #[case] fp: &str) {
        let err = RegionTag::new(TagKind::Approved, id, version, fp).unwrap_err();
        assert!(matches!(err, Error::InvalidField { .. }));
    }

    #[test]
    fn version_starting_with_prefix_survives_round_trip() {
        let t = tag(TagKind::Approved, "hello", "h2", "");
        assert_eq!(decode(&encode(&t)), Some(t));
    }
}
