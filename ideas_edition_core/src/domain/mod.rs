//! Domain model for the Ideas-Edition drafting pipeline.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial domain module layout.

pub mod chapter_draft;
pub mod coverage;
pub mod errors;
pub mod transcript_pair;
pub mod whitelist;

pub use chapter_draft::{ChapterDraft, CoreClaim, EnforcementResult};
pub use coverage::{ChapterCoverage, CoverageLevel, CoverageReport, GenerationMode};
pub use errors::PipelineError;
pub use transcript_pair::TranscriptPair;
pub use whitelist::WhitelistQuote;

/// Unicode-aware word count, used by the Coverage Analyzer's density
/// metrics (`quote_words_per_claim`) and the Whitelist Builder's
/// `usable_quotes` threshold.
pub fn word_count(text: &str) -> usize {
    use unicode_segmentation::UnicodeSegmentation;
    text.unicode_words().count()
}
