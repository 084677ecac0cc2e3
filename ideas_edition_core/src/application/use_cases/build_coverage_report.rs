//! Public entry point: `build_coverage_report`, the preflight gate described
//! in §4.4 and exposed at §6.3.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial build_coverage_report for the drafting pipeline.

use super::coverage_analyzer::{build_chapter_coverages, ChapterInput};
use super::whitelist_builder::build_whitelist;
use crate::domain::{CoverageReport, TranscriptPair};

/// Computes the corpus-level [`CoverageReport`] before any model call is
/// made, so an orchestrator can reject infeasible inputs rather than
/// generate hollow output. Never fails: an evidence map with no usable
/// quotes at all is reported as `is_feasible: false`, not an error.
pub fn build_coverage_report(
    document: &evidence_map::EvidenceMapDocument,
    transcript: &TranscriptPair,
    roster: &evidence_map::Roster,
    config: &crate::config::PipelineConfig,
) -> CoverageReport {
    let entries = document.flatten_entries();
    let whitelist = build_whitelist(&entries, transcript, roster);

    if document.chapters.is_empty() {
        tracing::warn!("coverage report requested for an evidence map with no chapters at all");
        return CoverageReport {
            chapters: std::vec::Vec::new(),
            is_feasible: false,
            notes: std::vec![std::string::String::from("evidence map declares no chapters")],
        };
    }

    let chapters_input: std::vec::Vec<ChapterInput> = document
        .chapters
        .iter()
        .map(|chapter| ChapterInput {
            chapter_index: chapter.chapter_index,
            claim_count: chapter.claims.len(),
        })
        .collect();

    let (coverages, index_map) = build_chapter_coverages(&chapters_input, &whitelist, config);

    let mut notes = std::vec::Vec::new();
    if whitelist.is_empty() {
        notes.push(std::string::String::from("whitelist is empty: no evidence survived validation against the transcript"));
    }

    let merged_effective_indices: std::collections::HashSet<u32> = {
        let mut counts: std::collections::HashMap<u32, u32> = std::collections::HashMap::new();
        for &effective in index_map.values() {
            *counts.entry(effective).or_insert(0) += 1;
        }
        counts.into_iter().filter(|&(_, count)| count > 1).map(|(effective, _)| effective).collect()
    };
    if !merged_effective_indices.is_empty() {
        notes.push(std::format!("{} chapter(s) merged with an adjacent WEAK neighbor", merged_effective_indices.len()));
    }

    let below_threshold = coverages.iter().filter(|c| c.usable_quotes < config.min_usable_quotes_for_feasibility).count();
    if below_threshold > 0 {
        notes.push(std::format!(
            "{below_threshold} of {} chapter(s) have fewer than {} usable quotes",
            coverages.len(),
            config.min_usable_quotes_for_feasibility
        ));
    }

    let is_feasible = !whitelist.is_empty() && below_threshold == 0;

    CoverageReport {
        chapters: coverages,
        is_feasible,
        notes,
    }
}
