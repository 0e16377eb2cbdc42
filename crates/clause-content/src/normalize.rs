//! Text normalization ahead of fingerprinting.
//!
//! Editing surfaces re-flow text: they swap line terminators, insert
//! non-breaking spaces, and pad indentation. None of that is a change to the
//! clause, so it must not change the fingerprint. Any other difference must.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of horizontal whitespace (spaces and tabs).
static HORIZONTAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("Invalid horizontal whitespace regex"));

/// Horizontal whitespace directly after a newline.
static LINE_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]+").expect("Invalid line indent regex"));

/// Canonicalize region text.
///
/// Applied in order:
/// 1. `\r\n` and lone `\r` become `\n`
/// 2. U+00A0 (no-break space) becomes a space
/// 3. runs of spaces/tabs collapse to one space
/// 4. spaces/tabs after a newline are dropped
/// 5. leading and trailing whitespace is trimmed
///
/// The function is idempotent: `normalize(&normalize(x)) == normalize(x)`.
///
/// # Example
///
/// ```
/// use clause_content::normalize;
///
/// assert_eq!(normalize("  Payment\r\n\t due  in 30\u{a0}days "), "Payment\ndue in 30 days");
/// ```
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = text.replace('\u{a0}', " ");
    let text = HORIZONTAL_RUN.replace_all(&text, " ");
    let text = LINE_INDENT.replace_all(&text, "\n");
    text.trim().to_string()
}
