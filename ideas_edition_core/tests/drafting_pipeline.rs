//! End-to-end integration tests exercising the three public entry points
//! together, rather than each use case in isolation.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial end-to-end coverage for the drafting pipeline.

use ideas_edition_core::{build_coverage_report, enforce, generate_chapter, ChapterDraft, PipelineConfig, PipelineError, TranscriptPair};

struct EchoAdapter;

#[async_trait::async_trait]
impl ideas_edition_core::GenerationAdapterPort for EchoAdapter {
    async fn generate(&self, _prompt: &str, _budget: u32) -> std::result::Result<std::string::String, PipelineError> {
        Ok(std::string::String::from(
            "David explained that wisdom is limitless because the growth of knowledge is open ended, \
             and that every solved problem only reveals new ones.\n\n\
             ### Core Claims\n\
             - **Knowledge grows without any final limit**: \"wisdom is limitless because the growth of knowledge is open ended\"\n\
             - **Every problem is soluble given the right knowledge**: \"every problem is soluble given the right knowledge\"",
        ))
    }
}

struct FabricatingAdapter;

#[async_trait::async_trait]
impl ideas_edition_core::GenerationAdapterPort for FabricatingAdapter {
    async fn generate(&self, _prompt: &str, _budget: u32) -> std::result::Result<std::string::String, PipelineError> {
        Ok(std::string::String::from(
            "David insisted that \"the moon is made of cheese\" during the recording.\n\n\
             ### Core Claims\n\
             - **A fabricated claim**: \"the moon is made of cheese\"",
        ))
    }
}

fn interview_transcript() -> TranscriptPair {
    TranscriptPair::from_raw(
        "Naval: What drives the growth of human knowledge?\n\
         David: I think wisdom is limitless because the growth of knowledge is open ended. \
         There is no final theory waiting at the end of inquiry. Every problem is soluble \
         given the right knowledge, and solving it only reveals new problems.\n\
         Naval: That's a hopeful way to put it.",
    )
}

fn roster() -> evidence_map::Roster {
    evidence_map::Roster::new(vec!["Naval".to_string()], vec!["David".to_string()])
}

fn single_chapter_document(transcript_hash: &str) -> evidence_map::EvidenceMapDocument {
    evidence_map::EvidenceMapDocument {
        version: 1,
        project_id: "episode-1".to_string(),
        transcript_hash: transcript_hash.to_string(),
        chapters: vec![evidence_map::ChapterEvidence {
            chapter_index: 1,
            chapter_title: Some("The Open-Ended Growth of Knowledge".to_string()),
            claims: vec![
                evidence_map::EvidenceEntry {
                    id: "ev-1".to_string(),
                    claim: "Knowledge grows without any final limit.".to_string(),
                    support: vec![evidence_map::EvidenceSupport {
                        quote_text: "wisdom is limitless because the growth of knowledge is open ended".to_string(),
                        speaker_name: Some("David".to_string()),
                    }],
                    chapter_index: 0,
                },
                evidence_map::EvidenceEntry {
                    id: "ev-2".to_string(),
                    claim: "Every problem is soluble given enough knowledge.".to_string(),
                    support: vec![evidence_map::EvidenceSupport {
                        quote_text: "every problem is soluble given the right knowledge".to_string(),
                        speaker_name: Some("David".to_string()),
                    }],
                    chapter_index: 0,
                },
            ],
        }],
    }
}

#[tokio::test]
async fn test_full_pipeline_produces_grounded_chapter_markdown() {
    // Validates the whole Canonicalize -> Whitelist -> Coverage -> Select -> Prompt -> Generate ->
    // Enforce -> Assemble -> Validate chain via the two public entry points together: the
    // preflight report must call the corpus feasible, and the drafted chapter's markdown must
    // contain only whitelisted quotations plus a well-formed Key Excerpts / Core Claims skeleton.
    let transcript = interview_transcript();
    let document = single_chapter_document(&transcript.hash);
    let roster = roster();
    let config = PipelineConfig::default();

    let report = build_coverage_report(&document, &transcript, &roster, &config);
    assert!(report.is_feasible, "expected a feasible report, got notes: {:?}", report.notes);

    let cancellation = tokio_util::sync::CancellationToken::new();
    let draft = generate_chapter(1, &document, &transcript, &roster, &config, &EchoAdapter, &cancellation)
        .await
        .expect("generation should succeed");

    let markdown = ideas_edition_core::application::use_cases::render(&draft);
    assert!(markdown.starts_with("## Chapter 1: The Open-Ended Growth of Knowledge"));
    assert!(markdown.contains("### Key Excerpts"));
    assert!(markdown.contains("### Core Claims"));
    assert!(markdown.contains("wisdom is limitless because the growth of knowledge is open ended"));
    assert_eq!(draft.core_claims.len(), 2);
}

#[tokio::test]
async fn test_fabricated_quote_never_survives_into_final_markdown() {
    // Validates the pipeline's central guarantee end to end: a model that fabricates a quotation
    // never lets it survive AS A QUOTATION. The unmatched inline quotation marks are stripped (the
    // underlying words remain as ordinary, unattributed prose, per the Enforcer's paraphrase
    // behavior), and the Core Claim bullet that cited it is dropped outright since its supporting
    // quote is not whitelisted.
    let transcript = interview_transcript();
    let document = single_chapter_document(&transcript.hash);
    let roster = roster();
    let config = PipelineConfig::default();
    let cancellation = tokio_util::sync::CancellationToken::new();

    let draft = generate_chapter(1, &document, &transcript, &roster, &config, &FabricatingAdapter, &cancellation)
        .await
        .expect("generation should succeed even though the model fabricated a quote");

    let markdown = ideas_edition_core::application::use_cases::render(&draft);
    assert!(!markdown.contains("\"the moon is made of cheese\""));
    assert!(!markdown.contains("- **A fabricated claim**"));
    assert!(markdown.contains("*No fully grounded claims available for this chapter.*"));
}

#[tokio::test]
async fn test_stale_transcript_aborts_generation_with_input_error() {
    // Validates that a transcript mutated out from under its own hash is rejected before any
    // model call, per the freshness invariant TranscriptPair enforces.
    let mut transcript = interview_transcript();
    let document = single_chapter_document(&transcript.hash);
    transcript.raw = "Someone replaced the transcript entirely.".to_string();

    let roster = roster();
    let config = PipelineConfig::default();
    let cancellation = tokio_util::sync::CancellationToken::new();

    let result = generate_chapter(1, &document, &transcript, &roster, &config, &EchoAdapter, &cancellation).await;
    assert!(matches!(result, Err(PipelineError::InputError { .. })));
}

#[tokio::test]
async fn test_empty_evidence_map_reports_infeasible_and_chapter_still_renders_placeholder() {
    // Validates the boundary behavior of an Evidence-Map with chapters but no claims at all: the
    // preflight report must mark it infeasible, and a caller that still tries to draft must get a
    // well-formed failure placeholder rather than a panic or empty string.
    let transcript = TranscriptPair::from_raw("An interview with no extractable evidence at all.");
    let document = evidence_map::EvidenceMapDocument {
        version: 1,
        project_id: "episode-empty".to_string(),
        transcript_hash: transcript.hash.clone(),
        chapters: vec![evidence_map::ChapterEvidence {
            chapter_index: 1,
            chapter_title: Some("An Empty Chapter".to_string()),
            claims: vec![],
        }],
    };
    let roster = roster();
    let config = PipelineConfig::default();

    let report = build_coverage_report(&document, &transcript, &roster, &config);
    assert!(!report.is_feasible);
    assert!(report.chapters.iter().all(|c| c.level == ideas_edition_core::CoverageLevel::Weak));

    let placeholder = ChapterDraft::render_failed(1, "An Empty Chapter", "evidence map declares no usable quotes");
    assert!(placeholder.contains("could not be drafted"));
}

#[tokio::test]
async fn test_enforce_is_reusable_directly_on_raw_model_output() {
    // Validates that `enforce` is independently useful for a caller that already holds raw model
    // output (e.g. a retry path) and wants to re-run grounding enforcement without going through
    // `generate_chapter` again.
    let transcript = interview_transcript();
    let document = single_chapter_document(&transcript.hash);
    let roster = roster();
    let config = PipelineConfig::default();
    let entries = document.flatten_entries();
    let whitelist = ideas_edition_core::application::use_cases::build_whitelist(&entries, &transcript, &roster);
    let _ = &config;

    let raw = "David said \"wisdom is limitless because the growth of knowledge is open ended\" plainly, \
               but also claimed \"the sky turned green\" which nobody can verify.";
    let result = enforce(raw, &whitelist, 1);
    assert!(result.text.contains("wisdom is limitless because the growth of knowledge is open ended"));
    assert!(!result.text.contains("the sky turned green"));
    assert!(result.replaced.iter().any(|q| q.contains("growth of knowledge is open ended")));
}
