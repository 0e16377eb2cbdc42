//! Approved clause catalog and insertion tagging for Clause Guard
//!
//! Clause indexes and baseline metadata arrive as loosely shaped JSON with
//! several accepted names per field. This crate turns them into one canonical
//! record type and implements the tagging protocol used when an approved
//! clause is inserted into a document.

pub mod baseline;
pub mod catalog;
pub mod error;
pub mod record;

pub use baseline::BaselineRecord;
pub use catalog::{Catalog, ClauseIndex};
pub use error::{Error, Result};
pub use record::ClauseRecord;
