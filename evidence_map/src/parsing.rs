//! Tolerant parsing of the Evidence-Map document.
//!
//! The document is LLM output and frequently deviates from the schema in
//! small ways: a renamed key, a null where an array was expected, a claim
//! with no support entries. [`tolerant_parse`] attempts a strict `serde`
//! deserialize first; on failure it falls back to walking the document as a
//! generic [`serde_json::Value`], accepting common key aliases and skipping
//! individually malformed claims or support entries rather than rejecting
//! the whole document. The document is only rejected outright if it is not
//! an object, has no `chapters` array, or every chapter is empty after
//! tolerant extraction.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial tolerant parser, modeled on this codebase's
//!   tolerant parsing of LLM-produced action-item JSON.

use crate::document::{ChapterEvidence, EvidenceEntry, EvidenceMapDocument, EvidenceSupport};
use crate::error::EvidenceMapError;

pub fn tolerant_parse(raw_json: &str) -> std::result::Result<EvidenceMapDocument, EvidenceMapError> {
    // A document that deserializes cleanly is accepted as-is, even if it
    // carries zero claims: a legitimately empty Evidence-Map is valid input,
    // surfaced downstream as an infeasible CoverageReport rather than
    // rejected here. The tolerant fallback below only runs when the strict
    // shape itself doesn't match.
    if let std::result::Result::Ok(doc) = serde_json::from_str::<EvidenceMapDocument>(raw_json) {
        return std::result::Result::Ok(doc);
    }

    let value: serde_json::Value = serde_json::from_str(raw_json)
        .map_err(|e| EvidenceMapError::DocumentMalformed { reason: std::format!("not valid JSON: {e}") })?;

    let root = value
        .as_object()
        .ok_or_else(|| EvidenceMapError::DocumentMalformed { reason: std::string::String::from("top-level value is not an object") })?;

    let chapters_value = root
        .get("chapters")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EvidenceMapError::DocumentMalformed { reason: std::string::String::from("missing or non-array 'chapters' field") })?;

    let version = root.get("version").and_then(|v| v.as_u64()).unwrap_or(1) as u32;
    let project_id = extract_str_alias(root, &["project_id", "projectId"]).unwrap_or_default();
    let transcript_hash = extract_str_alias(root, &["transcript_hash", "transcriptHash"]).unwrap_or_default();

    let mut chapters = std::vec::Vec::new();
    let mut total_claims = 0usize;

    for (chapter_idx, chapter_value) in chapters_value.iter().enumerate() {
        let chapter_obj = match chapter_value.as_object() {
            std::option::Option::Some(obj) => obj,
            std::option::Option::None => {
                tracing::warn!(chapter_position = chapter_idx, "skipping non-object chapter entry");
                continue;
            }
        };

        let chapter_index = match chapter_obj.get("chapter_index").and_then(|v| v.as_u64()) {
            std::option::Option::Some(idx) => idx as u32,
            std::option::Option::None => {
                tracing::warn!(chapter_position = chapter_idx, "skipping chapter with missing chapter_index");
                continue;
            }
        };

        let chapter_title = extract_str_alias(chapter_obj, &["chapter_title", "title"]);

        let claims_value = chapter_obj.get("claims").and_then(|v| v.as_array());
        let mut claims = std::vec::Vec::new();
        if let std::option::Option::Some(claims_array) = claims_value {
            for claim_value in claims_array {
                match parse_claim(claim_value) {
                    std::option::Option::Some(entry) => claims.push(entry),
                    std::option::Option::None => {
                        tracing::warn!(chapter_index, "skipping malformed claim entry");
                    }
                }
            }
        }

        total_claims += claims.len();
        chapters.push(ChapterEvidence { chapter_index, chapter_title, claims });
    }

    if total_claims == 0 {
        return std::result::Result::Err(EvidenceMapError::AllChaptersEmpty);
    }

    std::result::Result::Ok(EvidenceMapDocument { version, project_id, transcript_hash, chapters })
}

fn parse_claim(value: &serde_json::Value) -> std::option::Option<EvidenceEntry> {
    let obj = value.as_object()?;
    let claim = extract_str_alias(obj, &["claim", "claim_text", "text"])?;
    if claim.trim().is_empty() {
        return std::option::Option::None;
    }
    let id = extract_str_alias(obj, &["id"]).unwrap_or_else(|| std::string::String::from("ev-unlabeled"));

    let mut support = std::vec::Vec::new();
    if let std::option::Option::Some(support_array) = obj.get("support").and_then(|v| v.as_array()) {
        for support_value in support_array {
            if let std::option::Option::Some(entry) = parse_support(support_value) {
                support.push(entry);
            } else {
                tracing::warn!(claim_id = %id, "skipping malformed support entry");
            }
        }
    }

    std::option::Option::Some(EvidenceEntry { id, claim, support, chapter_index: 0 })
}

fn parse_support(value: &serde_json::Value) -> std::option::Option<EvidenceSupport> {
    let obj = value.as_object()?;
    let quote_text = extract_str_alias(obj, &["quote", "quote_text", "text"])?;
    if quote_text.trim().is_empty() {
        return std::option::Option::None;
    }
    let speaker_name = extract_str_alias(obj, &["speaker", "speaker_name", "name"])
        .filter(|name| !name.trim().is_empty());
    std::option::Option::Some(EvidenceSupport { quote_text, speaker_name })
}

fn extract_str_alias(obj: &serde_json::Map<std::string::String, serde_json::Value>, keys: &[&str]) -> std::option::Option<std::string::String> {
    for key in keys {
        if let std::option::Option::Some(v) = obj.get(*key) {
            if let std::option::Option::Some(s) = v.as_str() {
                return std::option::Option::Some(s.to_string());
            }
        }
    }
    std::option::Option::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerant_parse_accepts_strict_schema() {
        // Test: Validates that a well-formed document deserializes on the strict fast path.
        // Justification: Most Evidence-Map output matches the documented schema exactly; the
        // tolerant fallback should not be needed for the common case.
        let json = r#"{
            "version": 1,
            "project_id": "proj-1",
            "transcript_hash": "abc123",
            "chapters": [
                { "chapter_index": 1, "chapter_title": "Opening",
                  "claims": [
                    { "id": "ev-1", "claim": "Wisdom is limitless.",
                      "support": [ { "quote": "Wisdom is limitless", "speaker": "David" } ] } ] } ] }"#;
        let doc = tolerant_parse(json).unwrap();
        std::assert_eq!(doc.chapters.len(), 1);
        std::assert_eq!(doc.chapters[0].claims.len(), 1);
        std::assert_eq!(doc.chapters[0].claims[0].support[0].quote_text, "Wisdom is limitless");
    }

    #[test]
    fn test_tolerant_parse_accepts_aliased_keys() {
        // Test: Validates that the fallback path accepts common key aliases for quote/speaker/claim text.
        // Justification: LLM output routinely renames fields (quote_text instead of quote); rejecting
        // the whole document over a key spelling would discard otherwise-usable evidence.
        let json = r#"{
            "chapters": [
                { "chapter_index": 2,
                  "claims": [
                    { "claim_text": "Curiosity drives progress.",
                      "support": [ { "quote_text": "curiosity drives everything", "name": "Naval" } ] } ] } ] }"#;
        let doc = tolerant_parse(json).unwrap();
        std::assert_eq!(doc.chapters[0].claims[0].claim, "Curiosity drives progress.");
        std::assert_eq!(doc.chapters[0].claims[0].support[0].speaker_name.as_deref(), std::option::Option::Some("Naval"));
    }

    #[test]
    fn test_tolerant_parse_skips_malformed_claims_without_failing() {
        // Test: Validates that a malformed claim is skipped while well-formed sibling claims survive.
        // Justification: One bad element in a large LLM-produced array must not discard the whole chapter.
        let json = r#"{
            "chapters": [
                { "chapter_index": 1,
                  "claims": [
                    { "claim": "", "support": [] },
                    { "claim": "A real claim.", "support": [ { "quote": "real quote here", "speaker": "David" } ] } ] } ] }"#;
        let doc = tolerant_parse(json).unwrap();
        std::assert_eq!(doc.chapters[0].claims.len(), 1);
        std::assert_eq!(doc.chapters[0].claims[0].claim, "A real claim.");
    }

    #[test]
    fn test_tolerant_parse_rejects_document_with_no_chapters_array() {
        // Test: Validates that a document missing the chapters array entirely is rejected outright.
        // Justification: Without a chapters array there is no structure to tolerantly recover from.
        let json = r#"{ "version": 1 }"#;
        let err = tolerant_parse(json).unwrap_err();
        match err {
            EvidenceMapError::DocumentMalformed { .. } => {}
            other => panic!("expected DocumentMalformed, got {other:?}"),
        }
    }

    #[test]
    fn test_tolerant_parse_rejects_when_every_chapter_is_empty() {
        // Test: Validates that a document whose chapters all end up with zero usable claims errors
        // as AllChaptersEmpty rather than silently returning an empty document.
        // Justification: Matches §8 boundary behavior: an empty Evidence-Map surfaces as infeasible,
        // not as a quietly-accepted empty whitelist input.
        let json = r#"{ "chapters": [ { "chapter_index": 1, "claims": [] } ] }"#;
        let err = tolerant_parse(json).unwrap_err();
        match err {
            EvidenceMapError::AllChaptersEmpty => {}
            other => panic!("expected AllChaptersEmpty, got {other:?}"),
        }
    }
}
