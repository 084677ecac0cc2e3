//! Error type for Evidence-Map document parsing.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial EvidenceMapError for the drafting pipeline.

/// Failures specific to parsing an Evidence-Map document.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceMapError {
    /// The document is not a JSON object, or has no `chapters` array at all.
    #[error("evidence map document is malformed: {reason}")]
    DocumentMalformed { reason: std::string::String },

    /// Every chapter in the document was empty after tolerant extraction;
    /// there is nothing a whitelist could be built from.
    #[error("evidence map document has no usable claims in any chapter")]
    AllChaptersEmpty,
}
