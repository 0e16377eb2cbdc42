//! Mapping abstract markers onto host highlight colours

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::host::Marker;

/// Substitutes for colours that some hosts do not offer.
const BUILTIN_EQUIVALENTS: &[(&str, &[&str])] = &[
    ("BrightGreen", &["Green"]),
    ("Green", &["BrightGreen"]),
    ("Yellow", &["DarkYellow"]),
    ("Red", &["DarkRed"]),
];

fn default_unmanaged() -> String {
    "Red".to_string()
}

fn default_verified() -> String {
    "BrightGreen".to_string()
}

fn default_drifted() -> String {
    "Yellow".to_string()
}

/// Colour for each marker, plus user-supplied substitutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_unmanaged")]
    pub unmanaged: String,

    #[serde(default = "default_verified")]
    pub verified: String,

    #[serde(default = "default_drifted")]
    pub drifted: String,

    /// Colour name -> substitutes to try, in order, when the host rejects it
    #[serde(default)]
    pub equivalents: BTreeMap<String, Vec<String>>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            unmanaged: default_unmanaged(),
            verified: default_verified(),
            drifted: default_drifted(),
            equivalents: BTreeMap::new(),
        }
    }
}

impl Palette {
    /// Configured colour for a marker.
    pub fn color(&self, marker: Marker) -> &str {
        match marker {
            Marker::Unmanaged => &self.unmanaged,
            Marker::Verified => &self.verified,
            Marker::Drifted => &self.drifted,
        }
    }

    /// Colour to hand to a host that accepts only `accepted`.
    ///
    /// Tries the configured colour, then configured substitutes, then
    /// built-in substitutes. Matching ignores ASCII case and returns the
    /// host's spelling. An empty `accepted` list accepts anything. If nothing
    /// matches, the configured colour is returned unchanged.
    pub fn resolve(&self, marker: Marker, accepted: &[String]) -> String {
        let wanted = self.color(marker);
        if accepted.is_empty() {
            return wanted.to_string();
        }

        let configured = self
            .equivalents
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .flat_map(|(_, subs)| subs.iter().map(String::as_str));
        let builtin = BUILTIN_EQUIVALENTS
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .flat_map(|(_, subs)| subs.iter().copied());

        let found = std::iter::once(wanted)
            .chain(configured)
            .chain(builtin)
            .find_map(|candidate| accepted.iter().find(|a| a.eq_ignore_ascii_case(candidate)));

        match found {
            Some(color) => color.clone(),
            None => {
                warn!(color = wanted, ?marker, "Host accepts no equivalent colour; using it as-is");
                wanted.to_string()
            }
        }
    }
}
