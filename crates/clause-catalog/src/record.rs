//! Canonical clause record.
//!
//! Index entries come from several generations of the catalog and name the
//! same field differently. Each field below lists the accepted keys in
//! precedence order; the first one holding a non-empty value wins.
//!
//! | Field          | Keys                                   | Default             |
//! |----------------|----------------------------------------|---------------------|
//! | `clause_id`    | `clauseId`, `id`                       | `""`                |
//! | `title`        | `title`, `name`, then the clause id    | `"Untitled clause"` |
//! | `version`      | `version`                              | `"v1"`              |
//! | `approved`     | `approved` (truthiness)                | `true`              |
//! | `category`     | `category`                             | `""`                |
//! | `tags`         | `tags` (string entries of an array)    | `[]`                |
//! | `metadata_url` | `clauseJsonUrl`, `metaUrl`, `jsonUrl`  | `""`                |
//! | `document_url` | `clauseDocxUrl`, `docxUrl`             | `""`                |

use clause_content::{RegionTag, TagKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::baseline::BaselineRecord;
use crate::error::{Error, Result};

const DEFAULT_TITLE: &str = "Untitled clause";
const DEFAULT_VERSION: &str = "v1";

/// A clause entry after field normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseRecord {
    pub clause_id: String,
    pub title: String,
    pub version: String,
    pub approved: bool,
    pub category: String,
    pub tags: Vec<String>,
    /// Where the baseline metadata for this clause lives
    pub metadata_url: String,
    /// Where the clause body lives
    pub document_url: String,
}

impl ClauseRecord {
    /// Normalize one raw index entry.
    ///
    /// Never fails: a value that is not a JSON object yields a record made
    /// entirely of defaults.
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        let clause_id = first_text(obj, &["clauseId", "id"]).unwrap_or_default();
        let title = first_text(obj, &["title", "name"])
            .or_else(|| (!clause_id.is_empty()).then(|| clause_id.clone()))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let version = first_text(obj, &["version"]).unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let approved = obj.get("approved").map(truthy).unwrap_or(true);
        let category = first_text(obj, &["category"]).unwrap_or_default();
        let tags = match obj.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        };
        let metadata_url =
            first_text(obj, &["clauseJsonUrl", "metaUrl", "jsonUrl"]).unwrap_or_default();
        let document_url = first_text(obj, &["clauseDocxUrl", "docxUrl"]).unwrap_or_default();

        Self {
            clause_id,
            title,
            version,
            approved,
            category,
            tags,
            metadata_url,
            document_url,
        }
    }

    /// Title shown on an inserted region, e.g. `Mutual NDA (NDA-1 v1)`.
    pub fn region_title(&self) -> String {
        format!("{} ({} {})", self.title, self.clause_id, self.version)
    }

    /// Whether both the metadata and the body location are known.
    pub fn is_complete(&self) -> bool {
        !self.metadata_url.is_empty() && !self.document_url.is_empty()
    }

    /// Tag to write on a region holding this clause as an approved insertion.
    ///
    /// # Errors
    ///
    /// - [`Error::NotApproved`] if the clause is not approved
    /// - [`Error::MissingBaseline`] if the baseline has no fingerprint
    pub fn approved_tag(&self, baseline: &BaselineRecord) -> Result<RegionTag> {
        if !self.approved {
            return Err(Error::NotApproved {
                clause_id: self.clause_id.clone(),
            });
        }
        if baseline.fingerprint.is_empty() {
            return Err(Error::MissingBaseline {
                clause_id: self.clause_id.clone(),
            });
        }
        Ok(RegionTag::new(
            TagKind::Approved,
            self.clause_id.as_str(),
            self.version.as_str(),
            baseline.fingerprint.as_str(),
        )?)
    }

    /// Tag to write on a region holding this clause as a template.
    ///
    /// Templates may be tagged without a baseline; such regions can never
    /// validate as verified.
    pub fn template_tag(&self, baseline: Option<&BaselineRecord>) -> Result<RegionTag> {
        let fingerprint = baseline.map(|b| b.fingerprint.as_str()).unwrap_or_default();
        Ok(RegionTag::new(
            TagKind::Template,
            self.clause_id.as_str(),
            self.version.as_str(),
            fingerprint,
        )?)
    }
}

/// First key in `keys` holding a non-empty string (or a number, rendered as text).
pub(crate) fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_current_schema() {
        let record = ClauseRecord::from_value(&json!({
            "clauseId": "NDA-1",
            "title": "Mutual NDA",
            "version": "v2",
            "approved": true,
            "category": "confidentiality",
            "tags": ["nda", "mutual"],
            "clauseJsonUrl": "https://example.com/NDA-1_v2.json",
            "clauseDocxUrl": "https://example.com/NDA-1_v2.docx"
        }));

        assert_eq!(
            record,
            ClauseRecord {
                clause_id: "NDA-1".into(),
                title: "Mutual NDA".into(),
                version: "v2".into(),
                approved: true,
                category: "confidentiality".into(),
                tags: vec!["nda".into(), "mutual".into()],
                metadata_url: "https://example.com/NDA-1_v2.json".into(),
                document_url: "https://example.com/NDA-1_v2.docx".into(),
            }
        );
    }

    #[test]
    fn test_legacy_keys() {
        let record = ClauseRecord::from_value(&json!({
            "id": "PAY-3",
            "name": "Payment terms",
            "metaUrl": "./PAY-3.json",
            "docxUrl": "./PAY-3.docx"
        }));

        assert_eq!(record.clause_id, "PAY-3");
        assert_eq!(record.title, "Payment terms");
        assert_eq!(record.metadata_url, "./PAY-3.json");
        assert_eq!(record.document_url, "./PAY-3.docx");
    }

    #[test]
    fn test_newer_key_wins_over_legacy() {
        let record = ClauseRecord::from_value(&json!({
            "clauseId": "NEW",
            "id": "OLD",
            "clauseJsonUrl": "new.json",
            "metaUrl": "meta.json",
            "jsonUrl": "old.json"
        }));
        assert_eq!(record.clause_id, "NEW");
        assert_eq!(record.metadata_url, "new.json");
    }

    #[test]
    fn test_empty_string_falls_through_to_next_key() {
        let record = ClauseRecord::from_value(&json!({ "clauseId": "", "id": "LOL-1", "title": "" }));
        assert_eq!(record.clause_id, "LOL-1");
        assert_eq!(record.title, "LOL-1");
    }

    #[test]
    fn test_defaults() {
        let record = ClauseRecord::from_value(&json!({}));
        assert_eq!(record.clause_id, "");
        assert_eq!(record.title, "Untitled clause");
        assert_eq!(record.version, "v1");
        assert!(record.approved);
        assert!(record.tags.is_empty());
        assert!(!record.is_complete());
    }

    #[test]
    fn test_non_object_yields_defaults() {
        let record = ClauseRecord::from_value(&json!("NDA-1"));
        assert_eq!(record.title, "Untitled clause");
    }

    #[test]
    fn test_numeric_version_is_rendered() {
        let record = ClauseRecord::from_value(&json!({ "clauseId": "X", "version": 3 }));
        assert_eq!(record.version, "3");
    }

    #[test]
    fn test_non_string_tags_are_dropped() {
        let record = ClauseRecord::from_value(&json!({ "tags": ["a", 1, null, "b"] }));
        assert_eq!(record.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(null), false)]
    #[case(json!(0), false)]
    #[case(json!(1), true)]
    #[case(json!(""), false)]
    #[case(json!("no"), true)]
    fn test_approved_truthiness(#[case] value: Value, #[case] expected: bool) {
        let record = ClauseRecord::from_value(&json!({ "approved": value }));
        assert_eq!(record.approved, expected);
    }

    #[test]
    fn test_region_title() {
        let record = ClauseRecord::from_value(&json!({
            "clauseId": "NDA-1", "title": "Mutual NDA", "version": "v1"
        }));
        assert_eq!(record.region_title(), "Mutual NDA (NDA-1 v1)");
    }

    #[test]
    fn test_approved_tag_encodes_baseline() {
        let record = ClauseRecord::from_value(&json!({ "clauseId": "NDA-1", "version": "v1" }));
        let baseline = BaselineRecord::new("abc123");

        let tag = record.approved_tag(&baseline).unwrap();
        assert_eq!(clause_content::encode(&tag), "Approved|NDA-1|v1|habc123");
    }

    #[test]
    fn test_approved_tag_refuses_unapproved_clause() {
        let record = ClauseRecord::from_value(&json!({ "clauseId": "NDA-1", "approved": false }));
        let err = record.approved_tag(&BaselineRecord::new("abc")).unwrap_err();
        assert!(matches!(err, Error::NotApproved { clause_id } if clause_id == "NDA-1"));
    }

    #[test]
    fn test_approved_tag_requires_baseline() {
        let record = ClauseRecord::from_value(&json!({ "clauseId": "NDA-1" }));
        let err = record.approved_tag(&BaselineRecord::new("")).unwrap_err();
        assert!(matches!(err, Error::MissingBaseline { .. }));
    }

    #[test]
    fn test_template_tag_without_baseline() {
        let record = ClauseRecord::from_value(&json!({ "clauseId": "MISC-9" }));
        let tag = record.template_tag(None).unwrap();
        assert_eq!(clause_content::encode(&tag), "Template|MISC-9|v1|h");
    }

    #[test]
    fn test_clause_id_with_delimiter_cannot_be_tagged() {
        let record = ClauseRecord::from_value(&json!({ "clauseId": "A|B" }));
        let err = record.template_tag(None).unwrap_err();
        assert!(matches!(err, Error::Content(_)));
    }
}
