//! Region tag codec, text normalization, and fingerprinting for Clause Guard
//!
//! The leaf layer of the reconciliation engine. Everything here is pure:
//!
//! - [`tag`]: encode/decode the `Kind|clauseId|version|h<fingerprint>` string
//!   stored on a tagged region
//! - [`normalize`]: canonicalize region text so cosmetic re-flow is not drift
//! - [`fingerprint`]: SHA-256 content digest of normalized text

pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod tag;

pub use error::{Error, Result};
pub use fingerprint::{fingerprint, fingerprint_text};
pub use normalize::normalize;
pub use tag::{RegionTag, TagKind, decode, encode};
