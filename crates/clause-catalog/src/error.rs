//! Error types for clause-catalog

/// Result type for clause-catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in clause-catalog operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The clause index is neither an array nor an object with a `clauses` array
    #[error("Malformed clause index: {message}")]
    MalformedIndex { message: String },

    /// No record with this clause id
    #[error("Unknown clause: {clause_id}")]
    UnknownClause { clause_id: String },

    /// Insertion refused because the clause is not approved
    #[error("Clause {clause_id} is not approved")]
    NotApproved { clause_id: String },

    /// Insertion refused because the baseline metadata has no fingerprint
    #[error("Clause {clause_id} metadata has no baseline fingerprint")]
    MissingBaseline { clause_id: String },

    #[error(transparent)]
    Content(#[from] clause_content::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
