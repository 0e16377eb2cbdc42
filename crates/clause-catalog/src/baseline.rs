//! Baseline metadata published alongside each approved clause

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::record::first_text;

/// Fingerprint recorded when a clause was approved.
///
/// Read from `baselineFingerprint`, falling back to the legacy
/// `baselineHash`. Surrounding whitespace is trimmed; an absent field yields
/// an empty fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineRecord {
    pub fingerprint: String,
}

impl BaselineRecord {
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into().trim().to_string(),
        }
    }

    /// Parse clause metadata JSON.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let fingerprint = value
            .as_object()
            .and_then(|obj| {
                // A whitespace-only newer field must not shadow the legacy one.
                first_text(obj, &["baselineFingerprint"])
                    .filter(|s| !s.trim().is_empty())
                    .or_else(|| first_text(obj, &["baselineHash"]))
            })
            .unwrap_or_default();
        Self::new(fingerprint)
    }
}
