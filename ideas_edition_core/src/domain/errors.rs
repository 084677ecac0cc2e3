//! Error taxonomy for the drafting pipeline.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial PipelineError taxonomy, modeled on this
//!   codebase's ConfigError (named-field variants, one format string each).

/// The five-member error taxonomy the pipeline reports. Propagation policy:
/// `InputError` and `InvariantViolation` abort the whole draft.
/// `EvidenceUnusable` and `ProviderError` are per-chapter and the
/// orchestrator may continue with remaining chapters. `CancelledError` is
/// acknowledged between chapters only.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The transcript was empty, its hash did not match the stored
    /// canonical form, or the outline had fewer chapters than the evidence
    /// map declared. Fatal.
    #[error("input error: {reason}")]
    InputError { reason: std::string::String },

    /// The whitelist is empty for the entire document. Reported in the
    /// CoverageReport with feasibility=FAIL; not fatal on its own.
    #[error("evidence unusable for chapter {chapter_index}: {reason}")]
    EvidenceUnusable {
        chapter_index: u32,
        reason: std::string::String,
    },

    /// The language model call failed after retries and provider fallback.
    #[error("provider error for chapter {chapter_index} (provider {provider}): {reason}")]
    ProviderError {
        chapter_index: u32,
        provider: std::string::String,
        reason: std::string::String,
        retryable: bool,
    },

    /// An assembler post-condition failed. Indicates a bug in the pipeline
    /// itself, not a data problem; the chapter is discarded and the error
    /// surfaced with no silent recovery.
    #[error("invariant violated while assembling chapter {chapter_index}: {invariant}")]
    InvariantViolation {
        chapter_index: u32,
        invariant: std::string::String,
    },

    /// Cooperative cancellation was observed between chapters.
    #[error("draft generation cancelled after chapter {last_completed_chapter}")]
    CancelledError { last_completed_chapter: u32 },
}

impl PipelineError {
    /// True for the two error families that abort the whole draft rather
    /// than being handled per-chapter by the orchestrator.
    pub fn is_fatal_to_draft(&self) -> bool {
        matches!(self, PipelineError::InputError { .. } | PipelineError::InvariantViolation { .. })
    }
}
