//! ChapterDraft and the Enforcer's output shape.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial ChapterDraft and EnforcementResult types.

/// A short assertion paired with its supporting quotation. Retained only
/// when the supporting quote's speaker role is GUEST.
#[derive(Debug, Clone)]
pub struct CoreClaim {
    pub claim_text: std::string::String,
    pub supporting_quote: crate::domain::WhitelistQuote,
}

/// What the Enforcer did to the raw generated text: the final text plus a
/// trace of every blockquote/inline quote it replaced or dropped, used both
/// for audit logging and for the test suite's scenario assertions.
#[derive(Debug, Clone, Default)]
pub struct EnforcementResult {
    pub text: std::string::String,
    pub replaced: std::vec::Vec<std::string::String>,
    pub dropped: std::vec::Vec<std::string::String>,
}

/// The fully assembled output for one chapter.
#[derive(Debug, Clone)]
pub struct ChapterDraft {
    pub chapter_index: u32,
    pub effective_index: u32,
    pub title: std::string::String,
    pub narrative: std::string::String,
    pub key_excerpts: std::vec::Vec<crate::domain::WhitelistQuote>,
    pub core_claims: std::vec::Vec<CoreClaim>,
    pub coverage: crate::domain::ChapterCoverage,
    pub enforcement_trace: EnforcementResult,
}

impl ChapterDraft {
    /// Renders a chapter whose generation failed, per §7's user-visible
    /// behavior: never omitted silently, never containing fabricated
    /// content.
    pub fn render_failed(chapter_index: u32, title: &str, reason: &str) -> std::string::String {
        std::format!("## Chapter {chapter_index}: {title}\n\n*This chapter could not be drafted: {reason}.*\n")
    }
}
