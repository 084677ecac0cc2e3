//! Whitelist Builder: validates every Evidence-Map quote against the
//! transcript, dropping or merging entries.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial build_whitelist for the drafting pipeline.

/// Builds the set of [`crate::domain::WhitelistQuote`]s usable for
/// generation from an untrusted Evidence-Map. See §4.3 for the per-support
/// algorithm; the whitelist may legitimately come back empty.
pub fn build_whitelist(
    entries: &[evidence_map::EvidenceEntry],
    transcript: &crate::domain::TranscriptPair,
    roster: &evidence_map::Roster,
) -> std::vec::Vec<crate::domain::WhitelistQuote> {
    let casefolded_canonical = transcript.casefolded_canonical();
    let mut by_key: std::collections::HashMap<(std::string::String, std::string::String), crate::domain::WhitelistQuote> =
        std::collections::HashMap::new();

    for entry in entries {
        for support in &entry.support {
            let Some(speaker_name) = support.speaker_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
                tracing::debug!(evidence_id = %entry.id, "discarding support entry with no speaker");
                continue;
            };

            let speaker = roster.resolve(speaker_name);
            if speaker.role == evidence_map::SpeakerRole::Unclear {
                tracing::debug!(evidence_id = %entry.id, speaker = %speaker_name, "discarding support entry with unresolved speaker role");
                continue;
            }

            let quote_canonical = canonical_text::casefold_for_match(&canonical_text::canonicalize(&support.quote_text));
            if canonical_text::find_all_occurrences(&casefolded_canonical, &quote_canonical).is_empty() {
                tracing::debug!(evidence_id = %entry.id, quote = %support.quote_text, "discarding support entry not found in transcript");
                continue;
            }

            let spans = canonical_text::find_raw_spans(&quote_canonical, &transcript.raw);
            let Some(&(start, end)) = spans.first() else {
                tracing::debug!(evidence_id = %entry.id, quote = %support.quote_text, "discarding support entry with no raw-side match");
                continue;
            };
            let quote_text = transcript.raw[start..end].to_string();

            let key = (speaker.speaker_id.clone(), quote_canonical.clone());
            match by_key.get_mut(&key) {
                Some(existing) => {
                    existing.source_evidence_ids.push(entry.id.clone());
                    if !existing.chapter_indices.contains(&entry.chapter_index) {
                        existing.chapter_indices.push(entry.chapter_index);
                    }
                }
                None => {
                    let quote_id = crate::domain::WhitelistQuote::compute_quote_id(&speaker.speaker_id, &quote_canonical);
                    by_key.insert(
                        key,
                        crate::domain::WhitelistQuote {
                            quote_id,
                            quote_text,
                            quote_canonical,
                            speaker,
                            source_evidence_ids: std::vec![entry.id.clone()],
                            chapter_indices: std::vec![entry.chapter_index],
                            match_spans: spans,
                        },
                    );
                }
            }
        }
    }

    let mut whitelist: std::vec::Vec<_> = by_key.into_values().collect();
    whitelist.sort_by(|a, b| a.quote_id.cmp(&b.quote_id));
    whitelist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> evidence_map::Roster {
        evidence_map::Roster::new(
            std::vec![std::string::String::from("Naval")],
            std::vec![std::string::String::from("David")],
        )
    }

    fn entry(chapter_index: u32, id: &str, quote: &str, speaker: Option<&str>) -> evidence_map::EvidenceEntry {
        evidence_map::EvidenceEntry {
            id: id.to_string(),
            claim: std::string::String::from("A claim."),
            support: std::vec![evidence_map::EvidenceSupport {
                quote_text: quote.to_string(),
                speaker_name: speaker.map(str::to_string),
            }],
            chapter_index,
        }
    }

    #[test]
    fn test_scenario_s1_builds_single_whitelist_entry_with_straight_quotes() {
        // Test: Validates scenario S1 from the specification: a transcript with straight quotes,
        // an evidence support quote matching David (guest roster), produces exactly one whitelist
        // entry with quote_text rendered using the transcript's exact straight-quote form.
        // Justification: This is a literal seeded scenario from the specification's test suite.
        let transcript = crate::domain::TranscriptPair::from_raw("He said \"Wisdom is limitless\" today.");
        let entries = std::vec![entry(1, "ev-1", "Wisdom is limitless", Some("David"))];
        let whitelist = build_whitelist(&entries, &transcript, &roster());
        std::assert_eq!(whitelist.len(), 1);
        std::assert_eq!(whitelist[0].quote_text, "Wisdom is limitless");
    }

    #[test]
    fn test_discards_support_with_no_speaker() {
        // Test: Validates that a support entry with no speaker name is discarded entirely.
        // Justification: Per §4.3 step 1, an absent or empty speaker name must never reach
        // roster resolution or be added to the whitelist.
        let transcript = crate::domain::TranscriptPair::from_raw("Some transcript text here.");
        let entries = std::vec![entry(1, "ev-1", "transcript text", None)];
        let whitelist = build_whitelist(&entries, &transcript, &roster());
        std::assert!(whitelist.is_empty());
    }

    #[test]
    fn test_discards_support_with_unclear_speaker() {
        // Test: Validates that a speaker name absent from both rosters is discarded (UNCLEAR).
        // Justification: Per the specification's fail-closed default, unresolved speakers must
        // not produce whitelist entries.
        let transcript = crate::domain::TranscriptPair::from_raw("Some transcript text here.");
        let entries = std::vec![entry(1, "ev-1", "transcript text", Some("Unknown Person"))];
        let whitelist = build_whitelist(&entries, &transcript, &roster());
        std::assert!(whitelist.is_empty());
    }

    #[test]
    fn test_discards_quote_not_present_in_transcript() {
        // Test: Validates that a quote absent from the transcript is discarded.
        // Justification: §4.3 step 4 requires the whitelist never contain fabricated quotes.
        let transcript = crate::domain::TranscriptPair::from_raw("An entirely different sentence.");
        let entries = std::vec![entry(1, "ev-1", "Wisdom is limitless", Some("David"))];
        let whitelist = build_whitelist(&entries, &transcript, &roster());
        std::assert!(whitelist.is_empty());
    }

    #[test]
    fn test_same_speaker_and_quote_across_chapters_merges_into_one_entry() {
        // Test: Validates that the same (speaker, quote) appearing in evidence scoped to two
        // different chapters produces a single whitelist entry scoped to both chapters.
        // Justification: Per the data model, "same speaker+quote from distinct evidence entries
        // or chapters merges (chapter_indices and source_evidence_ids accumulated)."
        let transcript = crate::domain::TranscriptPair::from_raw("He said \"Wisdom is limitless\" today.");
        let entries = std::vec![
            entry(1, "ev-1", "Wisdom is limitless", Some("David")),
            entry(2, "ev-2", "wisdom is limitless", Some("David")),
        ];
        let whitelist = build_whitelist(&entries, &transcript, &roster());
        std::assert_eq!(whitelist.len(), 1);
        std::assert_eq!(whitelist[0].chapter_indices.len(), 2);
        std::assert_eq!(whitelist[0].source_evidence_ids.len(), 2);
    }

    #[test]
    fn test_same_quote_from_different_speakers_yields_distinct_entries() {
        // Test: Validates that identical quote text attributed to two different resolved
        // speakers produces two distinct whitelist entries.
        // Justification: Per the data model, same quote from different speakers must not merge.
        let transcript = crate::domain::TranscriptPair::from_raw("\"The truth matters\" said both of them.");
        let entries = std::vec![
            entry(1, "ev-1", "The truth matters", Some("David")),
            entry(1, "ev-2", "The truth matters", Some("Naval")),
        ];
        let whitelist = build_whitelist(&entries, &transcript, &roster());
        std::assert_eq!(whitelist.len(), 2);
    }
}
