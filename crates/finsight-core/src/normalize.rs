//! Text canonicalization for description matching
//!
//! Every classification path (trained model and keyword heuristic) operates
//! on this normalized form, so the rules here define the matching alphabet:
//! lowercase ASCII letters, digits, and single spaces.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize free text for downstream matching.
///
/// Lower-cases, strips accents by NFKD-decomposing and discarding non-ASCII
/// remnants, replaces anything outside `[a-z0-9 ]` with a space, collapses
/// whitespace runs, and trims. Empty input yields the empty string.
/// Idempotent: normalizing already-normalized text is a no-op.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    // NFKD splits accented characters into base + combining marks; dropping
    // the non-ASCII remainder leaves the base character.
    let ascii: String = lowered.nfkd().filter(|c| c.is_ascii()).collect();

    let mut out = String::with_capacity(ascii.len());
    let mut last_was_space = true; // leading whitespace gets trimmed
    for c in ascii.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}
