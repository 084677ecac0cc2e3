//! Unicode canonicalization for offset-stable quotation matching.
//!
//! Normalizes transcript and quote text so that substring checks against the
//! raw transcript succeed despite cosmetic Unicode differences (curly vs.
//! straight quotes, em/en-dashes, irregular whitespace) that a human reader
//! would consider identical text. Case is preserved by `canonicalize`; only
//! `casefold_for_match` lowercases, so the canonical form still reads like
//! the speaker's own words.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial canonicalizer for the drafting pipeline.

use unicode_normalization::UnicodeNormalization;

/// Normalizes `text` to NFC, maps curly quotes and dashes to their plain
/// ASCII equivalents, and collapses any run of whitespace to a single space.
///
/// Case is preserved. The operation is idempotent:
/// `canonicalize(canonicalize(x)) == canonicalize(x)`.
pub fn canonicalize(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    let substituted: String = nfc.chars().map(substitute_char).collect();
    collapse_whitespace(&substituted)
}

/// Lowercases already-canonical text for case-insensitive substring matching.
///
/// Callers normally pass the output of [`canonicalize`]; calling this
/// directly on un-normalized text still lowercases but does not perform
/// quote/dash substitution or whitespace collapse.
pub fn casefold_for_match(text: &str) -> String {
    text.to_lowercase()
}

/// SHA-256 hex digest of the UTF-8 encoding of `canonical_text`.
pub fn compute_hash(canonical_text: &str) -> String {
    use sha2::Digest;
    let digest = sha2::Sha256::digest(canonical_text.as_bytes());
    hex::encode(digest)
}

/// Returns true if `compute_hash(canonicalize(raw))` equals `stored_hash`.
///
/// Used to detect a stale draft: if the transcript mutated after a draft was
/// generated, any offsets computed against the old canonical form are no
/// longer trustworthy.
pub fn verify(raw: &str, stored_hash: &str) -> bool {
    compute_hash(&canonicalize(raw)) == stored_hash
}

/// Finds every byte-offset span in `haystack` where `needle` occurs as an
/// exact substring. Both arguments are expected to already be canonicalized
/// and casefolded by the caller; this function does no normalization of its
/// own, since callers need control over exactly which string each span
/// indexes into (canonical transcript vs. raw transcript).
///
/// Returns non-overlapping spans in left-to-right order.
pub fn find_all_occurrences(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    let mut spans = Vec::new();
    let mut search_from = 0usize;
    while let Some(pos) = haystack[search_from..].find(needle) {
        let start = search_from + pos;
        let end = start + needle.len();
        spans.push((start, end));
        search_from = end;
    }
    spans
}

/// Finds every byte-offset span in `raw` where text equivalent to
/// `quote_canonical` (already lower-cased and canonicalized) occurs,
/// tolerating the same curly-quote/dash/whitespace variation that
/// `canonicalize` normalizes away. This is the self-healing lookup the
/// Whitelist Builder uses to recover the speaker's exact raw-side rendering
/// regardless of how an Evidence-Map entry reformatted the quote: rather
/// than tracking a canonical-to-raw offset table, a regex is built from
/// `quote_canonical` that matches any of the equivalent raw renderings, then
/// searched directly against `raw`.
pub fn find_raw_spans(quote_canonical: &str, raw: &str) -> Vec<(usize, usize)> {
    if quote_canonical.is_empty() {
        return Vec::new();
    }
    let pattern = fuzzy_pattern(quote_canonical);
    let re = match regex::RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    re.find_iter(raw).map(|m| (m.start(), m.end())).collect()
}

fn fuzzy_pattern(quote_canonical: &str) -> String {
    let mut pattern = String::with_capacity(quote_canonical.len() * 2);
    let mut chars = quote_canonical.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            pattern.push_str(r"\s+");
            while chars.peek() == Some(&' ') {
                chars.next();
            }
        } else {
            match c {
                '"' => pattern.push_str("[\"\u{201C}\u{201D}\u{201F}]"),
                '\'' => pattern.push_str("['\u{2018}\u{2019}\u{201B}]"),
                '-' => pattern.push_str("[-\u{2013}\u{2014}\u{2012}\u{2015}]"),
                other => pattern.push_str(&regex::escape(&other.to_string())),
            }
        }
    }
    pattern
}

fn substitute_char(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201F}' | '\u{2033}' => '"',
        '\u{2013}' | '\u{2014}' | '\u{2012}' | '\u{2015}' => '-',
        other => other,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
