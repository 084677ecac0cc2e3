//! Public entry point: `generate_chapter`, orchestrating Select → Prompt →
//! Generate → Enforce → Assemble for one effective chapter (§5, §6.3).
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial generate_chapter for the drafting pipeline.

use super::coverage_analyzer::{build_chapter_coverages, ChapterInput};
use super::{assembler, enforcer, excerpt_selector, prompt_composer, whitelist_builder};
use crate::application::GenerationAdapterPort;
use crate::domain::{ChapterDraft, CoreClaim, PipelineError, TranscriptPair, WhitelistQuote};

/// Runs one chapter through the full pipeline: builds the whitelist and
/// coverage for the whole document, locates `chapter_index`'s effective
/// (post-merge) chapter, then selects excerpts, composes the prompt, calls
/// the adapter, enforces the result, and assembles the final draft.
///
/// Side effects occur strictly in Canonicalize → Whitelist → Coverage →
/// Select → Prompt → Generate → Enforce → Assemble order, per §5.
pub async fn generate_chapter(
    chapter_index: u32,
    document: &evidence_map::EvidenceMapDocument,
    transcript: &TranscriptPair,
    roster: &evidence_map::Roster,
    config: &crate::config::PipelineConfig,
    adapter: &dyn GenerationAdapterPort,
    cancellation: &tokio_util::sync::CancellationToken,
) -> std::result::Result<ChapterDraft, PipelineError> {
    if !transcript.is_fresh() {
        return std::result::Result::Err(PipelineError::InputError {
            reason: std::string::String::from("transcript no longer matches its stored canonical hash"),
        });
    }

    let Some(source_chapter) = document.chapters.iter().find(|c| c.chapter_index == chapter_index) else {
        return std::result::Result::Err(PipelineError::InputError {
            reason: std::format!("no outline chapter with chapter_index {chapter_index} in the evidence map"),
        });
    };

    let entries = document.flatten_entries();
    let whitelist = whitelist_builder::build_whitelist(&entries, transcript, roster);

    let chapters_input: std::vec::Vec<ChapterInput> = document
        .chapters
        .iter()
        .map(|chapter| ChapterInput {
            chapter_index: chapter.chapter_index,
            claim_count: chapter.claims.len(),
        })
        .collect();
    let (coverages, index_map) = build_chapter_coverages(&chapters_input, &whitelist, config);

    let Some(&effective_index) = index_map.get(&chapter_index) else {
        return std::result::Result::Err(PipelineError::InputError {
            reason: std::format!("chapter_index {chapter_index} did not resolve to an effective chapter"),
        });
    };
    let coverage = coverages[effective_index as usize].clone();

    let mut scope_indices: std::vec::Vec<u32> = index_map.iter().filter(|&(_, &effective)| effective == effective_index).map(|(&original, _)| original).collect();
    scope_indices.sort_unstable();

    if cancellation.is_cancelled() {
        return std::result::Result::Err(PipelineError::CancelledError {
            last_completed_chapter: effective_index.saturating_sub(1),
        });
    }

    let claims: std::vec::Vec<std::string::String> = document
        .chapters
        .iter()
        .filter(|chapter| scope_indices.contains(&chapter.chapter_index))
        .flat_map(|chapter| chapter.claims.iter().map(|entry| entry.claim.clone()))
        .collect();

    let title = source_chapter.chapter_title.clone().unwrap_or_else(|| std::format!("Chapter {}", effective_index + 1));
    let excerpt_count = excerpt_count_for_level(coverage.level, config);
    let mut excerpts = excerpt_selector::select_excerpts(&whitelist, &scope_indices, excerpt_count);

    let prompt = prompt_composer::compose_prompt(&prompt_composer::ChapterPromptInput {
        chapter_title: &title,
        claims: &claims,
        excerpts: &excerpts,
        target_words: coverage.target_words,
        generation_mode: coverage.generation_mode,
    });

    let representative_chapter_index = scope_indices[0];
    tracing::debug!(chapter_index = representative_chapter_index, effective_index, "invoking generation adapter");

    let generated = match tokio::time::timeout(config.per_chapter_timeout, adapter.generate(&prompt, coverage.target_words)).await {
        std::result::Result::Ok(std::result::Result::Ok(text)) => text,
        std::result::Result::Ok(std::result::Result::Err(error)) => {
            tracing::error!(chapter_index = representative_chapter_index, %error, "generation adapter returned an error");
            return std::result::Result::Err(error);
        }
        std::result::Result::Err(_elapsed) => {
            let error = PipelineError::ProviderError {
                chapter_index: representative_chapter_index,
                provider: std::string::String::from("unknown"),
                reason: std::string::String::from("per-chapter timeout elapsed"),
                retryable: true,
            };
            tracing::error!(chapter_index = representative_chapter_index, "generation timed out");
            return std::result::Result::Err(error);
        }
    };

    let enforcement = enforcer::enforce(&generated, &whitelist, representative_chapter_index);
    let narrative = assembler::strip_trailing_sections(&enforcement.text);
    let core_claims = extract_core_claims(&enforcement.text, &whitelist, representative_chapter_index);
    excerpts = excerpt_selector::supplement_with_core_claim_quotes(excerpts, &core_claims, excerpt_count);

    let draft = ChapterDraft {
        chapter_index: representative_chapter_index,
        effective_index,
        title,
        narrative,
        key_excerpts: excerpts,
        core_claims,
        coverage,
        enforcement_trace: enforcement,
    };

    let markdown = assembler::render(&draft);
    assembler::validate_invariants(draft.effective_index, &markdown, &whitelist)?;

    std::result::Result::Ok(draft)
}

fn excerpt_count_for_level(level: crate::domain::CoverageLevel, config: &crate::config::PipelineConfig) -> usize {
    match level {
        crate::domain::CoverageLevel::Strong => config.strong.excerpt_count,
        crate::domain::CoverageLevel::Medium => config.medium.excerpt_count,
        crate::domain::CoverageLevel::Weak => config.weak.excerpt_count,
    }
}

/// Parses `### Core Claims`-style bullets (`- **claim**: "quote"`) out of
/// enforced text and resolves each quote back to its whitelist entry via the
/// same `resolve_quote(..., require_guest=true)` tie-break the Enforcer's own
/// `filter_core_claims` step already used to decide the bullet survives at
/// all. A bare `quote_text` equality check would re-derive the match
/// independently of that filter and could attach a HOST-sourced entry to a
/// claim the Enforcer restricted to GUEST when both share identical text.
fn extract_core_claims(enforced_text: &str, whitelist: &[WhitelistQuote], chapter_index: u32) -> std::vec::Vec<CoreClaim> {
    let bullet_re = regex::Regex::new(r#"^- \*\*(.+?)\*\*: "(.+)"$"#).expect("static core claims bullet regex");
    let mut claims = std::vec::Vec::new();
    for line in enforced_text.lines() {
        let Some(captures) = bullet_re.captures(line) else {
            continue;
        };
        let claim_text = captures[1].to_string();
        let quote_text = &captures[2];
        let canonical_key = canonical_text::casefold_for_match(&canonical_text::canonicalize(quote_text));
        if let Some(matched) = enforcer::resolve_quote(whitelist, &canonical_key, None, chapter_index, true) {
            claims.push(CoreClaim {
                claim_text,
                supporting_quote: matched.clone(),
            });
        }
    }
    claims
}
