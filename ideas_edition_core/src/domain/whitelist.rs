//! WhitelistQuote: the set of quotations proven to exist in the transcript.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial WhitelistQuote for the drafting pipeline.

/// A quotation proven to be an exact substring of the raw transcript, with a
/// resolved speaker, and therefore safe to emit. This is the only source of
/// quoted text the Enforcer and Excerpt Selector are allowed to draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistQuote {
    pub quote_id: std::string::String,
    pub quote_text: std::string::String,
    pub quote_canonical: std::string::String,
    pub speaker: evidence_map::SpeakerRef,
    pub source_evidence_ids: std::vec::Vec<std::string::String>,
    pub chapter_indices: std::vec::Vec<u32>,
    pub match_spans: std::vec::Vec<(usize, usize)>,
}

impl WhitelistQuote {
    /// `quote_id = sha256(speaker_id || "|" || quote_canonical)[:16]`, stable
    /// across runs for a given (speaker_id, quote_canonical) pair.
    pub fn compute_quote_id(speaker_id: &str, quote_canonical: &str) -> std::string::String {
        let key = std::format!("{speaker_id}|{quote_canonical}");
        let full_hash = canonical_text::compute_hash(&key);
        full_hash[..16].to_string()
    }

    /// The key this quote is merged on: same speaker and same canonical
    /// text from distinct evidence entries or chapters accumulate into one
    /// entry rather than producing duplicates.
    pub fn merge_key(&self) -> (std::string::String, std::string::String) {
        (self.speaker.speaker_id.clone(), self.quote_canonical.clone())
    }

    /// Whether word_count(quote_text) >= 8, the Coverage Analyzer's
    /// threshold for a quote counting toward `usable_quotes`.
    pub fn is_usable_for_coverage(&self) -> bool {
        crate::domain::word_count(&self.quote_text) >= 8
    }

    pub fn is_scoped_to_chapter(&self, chapter_index: u32) -> bool {
        self.chapter_indices.contains(&chapter_index)
    }
}
