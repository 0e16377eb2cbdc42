//! Clause index parsing and the catalog context object

use clause_content::RegionTag;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::baseline::BaselineRecord;
use crate::error::{Error, Result};
use crate::record::ClauseRecord;

/// Raw clause index as published: either a bare array of records or an
/// object with a `clauses` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseIndex {
    List(Vec<Value>),
    Wrapped { clauses: Vec<Value> },
}

impl ClauseIndex {
    /// Parse index JSON.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] for invalid JSON, [`Error::MalformedIndex`] when the
    /// document has neither accepted shape.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        serde_json::from_value(value).map_err(|_| Error::MalformedIndex {
            message: "expected an array of clauses or an object with a `clauses` array"
                .to_string(),
        })
    }

    pub fn entries(&self) -> &[Value] {
        match self {
            Self::List(entries) | Self::Wrapped { clauses: entries } => entries,
        }
    }
}

/// The loaded set of approved clauses.
///
/// Passed explicitly to whoever needs it; there is no global catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    records: Vec<ClauseRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ClauseRecord>) -> Self {
        Self { records }
    }

    /// Build a catalog from a parsed index, normalizing every entry.
    pub fn from_index(index: &ClauseIndex) -> Self {
        let records: Vec<ClauseRecord> = index.entries().iter().map(ClauseRecord::from_value).collect();
        debug!(count = records.len(), "Loaded clause catalog");

        let catalog = Self { records };
        let incomplete = catalog.incomplete();
        if !incomplete.is_empty() {
            warn!(
                clauses = ?incomplete.iter().map(|r| r.clause_id.as_str()).collect::<Vec<_>>(),
                "Some clauses are missing metadata or document URLs"
            );
        }
        catalog
    }

    /// Parse index JSON straight into a catalog.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(Self::from_index(&ClauseIndex::parse(content)?))
    }

    pub fn records(&self) -> &[ClauseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a clause by id. The first record wins if ids repeat.
    pub fn get(&self, clause_id: &str) -> Option<&ClauseRecord> {
        self.records.iter().find(|r| r.clause_id == clause_id)
    }

    /// Records missing a metadata or document URL.
    pub fn incomplete(&self) -> Vec<&ClauseRecord> {
        self.records.iter().filter(|r| !r.is_complete()).collect()
    }

    fn require(&self, clause_id: &str) -> Result<&ClauseRecord> {
        self.get(clause_id).ok_or_else(|| Error::UnknownClause {
            clause_id: clause_id.to_string(),
        })
    }

    /// Tag for inserting `clause_id` as an approved clause.
    pub fn approved_tag(&self, clause_id: &str, baseline: &BaselineRecord) -> Result<RegionTag> {
        self.require(clause_id)?.approved_tag(baseline)
    }

    /// Tag for inserting `clause_id` as a template.
    pub fn template_tag(&self, clause_id: &str, baseline: Option<&BaselineRecord>) -> Result<RegionTag> {
        self.require(clause_id)?.template_tag(baseline)
    }
}
