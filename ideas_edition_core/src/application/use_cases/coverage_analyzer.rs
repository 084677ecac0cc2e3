//! Coverage Analyzer and Chapter Merger: per-chapter density metrics and the
//! single-pass adjacent-WEAK chapter merge.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial coverage analyzer for the drafting pipeline.

use crate::domain::{ChapterCoverage, CoverageLevel, GenerationMode, WhitelistQuote};

/// One outline chapter's identity and claim count, the minimal input the
/// analyzer needs per chapter before any whitelist scoping is applied.
#[derive(Debug, Clone, Copy)]
pub struct ChapterInput {
    pub chapter_index: u32,
    pub claim_count: usize,
}

/// Computes coverage for every chapter, then runs the single-pass
/// adjacent-WEAK merge. Returns the resulting coverages (one per effective
/// chapter, in order) and an `old chapter_index -> new effective index` map.
pub fn build_chapter_coverages(
    chapters: &[ChapterInput],
    whitelist: &[WhitelistQuote],
    config: &crate::config::PipelineConfig,
) -> (std::vec::Vec<ChapterCoverage>, std::collections::HashMap<u32, u32>) {
    let pre_merge: std::vec::Vec<ChapterCoverage> = chapters
        .iter()
        .map(|c| compute_chapter_coverage(c.chapter_index, whitelist, c.claim_count, config))
        .collect();

    let mut merged = std::vec::Vec::new();
    let mut index_map = std::collections::HashMap::new();
    let mut effective_index = 0u32;
    let mut i = 0usize;
    while i < chapters.len() {
        let both_weak = i + 1 < chapters.len()
            && pre_merge[i].level == CoverageLevel::Weak
            && pre_merge[i + 1].level == CoverageLevel::Weak;

        if both_weak {
            let a = chapters[i];
            let b = chapters[i + 1];
            let combined_claim_count = a.claim_count + b.claim_count;
            let coverage = compute_merged_chapter_coverage(a.chapter_index, b.chapter_index, whitelist, combined_claim_count, config);
            index_map.insert(a.chapter_index, effective_index);
            index_map.insert(b.chapter_index, effective_index);
            merged.push(coverage);
            effective_index += 1;
            i += 2;
        } else {
            index_map.insert(chapters[i].chapter_index, effective_index);
            merged.push(pre_merge[i].clone());
            effective_index += 1;
            i += 1;
        }
    }

    (merged, index_map)
}

fn compute_chapter_coverage(
    chapter_index: u32,
    whitelist: &[WhitelistQuote],
    claim_count: usize,
    config: &crate::config::PipelineConfig,
) -> ChapterCoverage {
    coverage_for_scope(chapter_index, |q| q.is_scoped_to_chapter(chapter_index), whitelist, claim_count, config)
}

fn compute_merged_chapter_coverage(
    a_index: u32,
    b_index: u32,
    whitelist: &[WhitelistQuote],
    claim_count: usize,
    config: &crate::config::PipelineConfig,
) -> ChapterCoverage {
    coverage_for_scope(a_index, |q| q.is_scoped_to_chapter(a_index) || q.is_scoped_to_chapter(b_index), whitelist, claim_count, config)
}

fn coverage_for_scope(
    chapter_index: u32,
    is_scoped: impl Fn(&WhitelistQuote) -> bool,
    whitelist: &[WhitelistQuote],
    claim_count: usize,
    config: &crate::config::PipelineConfig,
) -> ChapterCoverage {
    let usable: std::vec::Vec<&WhitelistQuote> = whitelist.iter().filter(|q| is_scoped(q) && q.is_usable_for_coverage()).collect();
    let usable_quotes = usable.len();
    let total_words: usize = usable.iter().map(|q| crate::domain::word_count(&q.quote_text)).sum();
    let divisor = (claim_count.max(1)) as f64;
    let quote_words_per_claim = total_words as f64 / divisor;
    let quotes_per_claim = usable_quotes as f64 / divisor;

    let (level, target_words, generation_mode) = if usable_quotes >= config.strong.min_usable_quotes && quote_words_per_claim >= config.strong.min_quote_words_per_claim {
        (CoverageLevel::Strong, config.strong.target_words, GenerationMode::Normal)
    } else if usable_quotes >= config.medium.min_usable_quotes && quote_words_per_claim >= config.medium.min_quote_words_per_claim {
        (CoverageLevel::Medium, config.medium.target_words, GenerationMode::Thin)
    } else {
        (CoverageLevel::Weak, config.weak.target_words, GenerationMode::ExcerptOnly)
    };

    ChapterCoverage {
        chapter_index,
        level,
        usable_quotes,
        quote_words_per_claim,
        quotes_per_claim,
        target_words,
        generation_mode,
    }
}
