//! Identifier derivation from leaf positions in the taxonomy
//!
//! Folder names carry numeric prefixes such as `2.1 Controle` or
//! `1. Incidentes`. Two scanners pull numbers out of them, and a per-category
//! scheme decides which segment feeds which part of the `X.Y.Z` identifier.
//! Only the first two path segments below the category are consulted, so
//! deeper folders collapse onto the identifier of their ancestors.

use crate::models::ItemId;
use crate::taxonomy::IdentifierScheme;

const MISSING: &str = "0";

/// Leftmost maximal run of ASCII digits.
#[must_use]
pub fn first_digit_run(s: &str) -> Option<&str> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Digit run captured by `\d+\.(\d+)` at its leftmost match.
#[must_use]
pub fn digit_run_after_dot(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        // A match can only start at the head of a digit run; later starts in
        // the same run hit the same dot.
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            return Some(&s[start..end]);
        }
    }
    None
}

/// Leading numeral of a category name, e.g. `"1"` for `"1. SMS"`.
#[must_use]
pub fn category_numeral(name: &str) -> String {
    first_digit_run(name).unwrap_or(MISSING).to_string()
}

fn first_or_missing(segment: Option<&String>) -> &str {
    segment
        .and_then(|s| first_digit_run(s))
        .unwrap_or(MISSING)
}

fn after_dot_or_missing(segment: Option<&String>) -> &str {
    segment
        .and_then(|s| digit_run_after_dot(s))
        .unwrap_or(MISSING)
}

/// Compute the identifier of a leaf.
///
/// `segments` is the path from the category folder down to the leaf,
/// excluding the category folder itself.
#[must_use]
pub fn compute_identifier(numeral: &str, scheme: IdentifierScheme, segments: &[String]) -> ItemId {
    let seg0 = segments.first();
    let seg1 = segments.get(1);

    match scheme {
        IdentifierScheme::CategoryPrefixed => {
            let y = first_or_missing(seg0);
            let z = seg1
                .and_then(|s| digit_run_after_dot(s).or_else(|| first_digit_run(s)))
                .unwrap_or(MISSING);
            ItemId::new(numeral, y, z)
        }
        IdentifierScheme::SectionDotted => {
            let x = first_or_missing(seg0);
            let y = after_dot_or_missing(seg0);
            let z = first_or_missing(seg1);
            ItemId::new(x, y, z)
        }
    }
}
