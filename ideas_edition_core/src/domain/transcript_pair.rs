//! TranscriptPair: raw and canonical transcript text held together.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial TranscriptPair for the drafting pipeline.

/// The raw transcript and its canonicalized form, frozen together at
/// generation start. `hash` is the SHA-256 of `canonical`; any draft
/// produced from this pair is considered stale once the underlying
/// transcript changes and no longer matches `hash`.
#[derive(Debug, Clone)]
pub struct TranscriptPair {
    pub raw: std::string::String,
    pub canonical: std::string::String,
    pub hash: std::string::String,
}

impl TranscriptPair {
    /// Builds a TranscriptPair from raw transcript text, canonicalizing and
    /// hashing it once up front.
    pub fn from_raw(raw: impl Into<std::string::String>) -> Self {
        let raw = raw.into();
        let canonical = canonical_text::canonicalize(&raw);
        let hash = canonical_text::compute_hash(&canonical);
        Self { raw, canonical, hash }
    }

    /// Re-verifies that `raw` still canonicalizes to the hash this pair was
    /// constructed with. Used to detect a transcript mutated out from under
    /// a draft that referenced its hash.
    pub fn is_fresh(&self) -> bool {
        canonical_text::verify(&self.raw, &self.hash)
    }

    /// Lower-cased canonical transcript, used by substring matching.
    pub fn casefolded_canonical(&self) -> std::string::String {
        canonical_text::casefold_for_match(&self.canonical)
    }
}
