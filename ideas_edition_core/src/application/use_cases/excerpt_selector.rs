//! Deterministic Excerpt Selector: picks Key Excerpts straight from the
//! whitelist, never from model output.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial excerpt selector for the drafting pipeline.

use crate::domain::WhitelistQuote;
use evidence_map::SpeakerRole;

/// Selects up to `required_count` excerpts scoped to `chapter_scope` (the one
/// or two original chapter indices an effective chapter covers after
/// merging), following the fallback chain of §4.5: GUEST-scoped, then
/// non-HOST-scoped, then GUEST-global, then any-speaker-global. The first
/// tier that reaches `required_count` wins; if no tier does, whatever the
/// last tier yielded is returned as-is rather than padded with fabricated
/// entries.
pub fn select_excerpts(whitelist: &[WhitelistQuote], chapter_scope: &[u32], required_count: usize) -> std::vec::Vec<WhitelistQuote> {
    if required_count == 0 {
        return std::vec::Vec::new();
    }
    let in_scope = |q: &WhitelistQuote| q.chapter_indices.iter().any(|ci| chapter_scope.contains(ci));

    let tiers: [fn(&WhitelistQuote, &dyn Fn(&WhitelistQuote) -> bool) -> bool; 4] = [
        |q, in_scope| q.speaker.role == SpeakerRole::Guest && in_scope(q),
        |q, in_scope| q.speaker.role != SpeakerRole::Host && in_scope(q),
        |q, _in_scope| q.speaker.role == SpeakerRole::Guest,
        |_q, _in_scope| true,
    ];

    let mut last: std::vec::Vec<WhitelistQuote> = std::vec::Vec::new();
    for predicate in tiers {
        let mut candidates: std::vec::Vec<WhitelistQuote> = whitelist.iter().filter(|q| predicate(q, &in_scope)).cloned().collect();
        sort_stable(&mut candidates);
        if candidates.len() >= required_count {
            candidates.truncate(required_count);
            return candidates;
        }
        last = candidates;
    }
    last
}

/// Tier 5 of §4.5: if the chapter's Core Claims reference supporting quotes
/// not already present in `selected`, append them (still capped at
/// `required_count`). Run after enforcement, once the final Core Claims are
/// known, to backfill excerpts a sparse chapter would otherwise lack.
pub fn supplement_with_core_claim_quotes(
    mut selected: std::vec::Vec<WhitelistQuote>,
    core_claims: &[crate::domain::CoreClaim],
    required_count: usize,
) -> std::vec::Vec<WhitelistQuote> {
    if selected.len() >= required_count {
        return selected;
    }
    for claim in core_claims {
        if selected.len() >= required_count {
            break;
        }
        let already_present = selected.iter().any(|q| q.quote_id == claim.supporting_quote.quote_id);
        if !already_present {
            selected.push(claim.supporting_quote.clone());
        }
    }
    selected
}

fn sort_stable(quotes: &mut [WhitelistQuote]) {
    quotes.sort_by(|a, b| b.quote_text.len().cmp(&a.quote_text.len()).then_with(|| a.quote_id.cmp(&b.quote_id)));
}
