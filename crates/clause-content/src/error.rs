//! Error types for clause-content

/// Result type for clause-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in clause-content operations
///
/// Decoding never fails; only building a tag from caller-supplied fields can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {field} for region tag: {value:?} contains the '|' delimiter")]
    InvalidField { field: &'static str, value: String },
}
