//! Command implementations

mod document;
mod fingerprint;
mod inspect;
mod reset;
mod tag;
mod validate;

pub use fingerprint::run_fingerprint;
pub use inspect::run_inspect;
pub use reset::run_reset;
pub use tag::run_tag;
pub use validate::run_validate;
