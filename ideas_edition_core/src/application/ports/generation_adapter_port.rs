//! GenerationAdapterPort: the narrow interface to the language model.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial GenerationAdapterPort trait definition.

/// Narrow interface to a text-generation provider. Implementations
/// encapsulate retry with exponential backoff, automatic provider fallback,
/// and per-request correlation IDs; callers see only a successful
/// completion or a single `ProviderError`.
///
/// Not marked with a `hexser` port derive: port traits in this codebase are
/// plain `async_trait` traits, since attribute-macro support for trait
/// definitions is not available in the pinned `hexser` release this
/// workspace uses.
#[async_trait::async_trait]
pub trait GenerationAdapterPort: Send + Sync {
    /// Generates up to `budget` words of text from `prompt`. Returns the raw
    /// model output, or a `PipelineError::ProviderError` describing why
    /// generation failed after retries and fallback were exhausted.
    async fn generate(
        &self,
        prompt: &str,
        budget: u32,
    ) -> std::result::Result<std::string::String, crate::domain::PipelineError>;
}
