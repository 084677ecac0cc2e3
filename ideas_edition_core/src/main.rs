//! Demo binary: drafts one chapter from a small embedded transcript and
//! Evidence-Map, then prints the resulting markdown.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial demo binary for the drafting pipeline.

use ideas_edition_core::{build_coverage_report, generate_chapter, PipelineConfig, TranscriptPair};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let transcript = TranscriptPair::from_raw(
        "Naval: So tell me, what do you think drives the growth of human knowledge?\n\
         David: I think wisdom is limitless because the growth of knowledge is open ended. \
         There is no final theory waiting at the end of inquiry.\n\
         Naval: That is a hopeful way to put it.\n\
         David: Every problem is soluble given the right knowledge, and solving it only reveals new problems.",
    );

    let roster = evidence_map::Roster::new(vec!["Naval".to_string()], vec!["David".to_string()]);

    let document = evidence_map::EvidenceMapDocument {
        version: 1,
        project_id: "demo-episode".to_string(),
        transcript_hash: transcript.hash.clone(),
        chapters: vec![evidence_map::ChapterEvidence {
            chapter_index: 1,
            chapter_title: Some("The Open-Ended Growth of Knowledge".to_string()),
            claims: vec![evidence_map::EvidenceEntry {
                id: "ev-1".to_string(),
                claim: "Knowledge grows without any final limit.".to_string(),
                support: vec![evidence_map::EvidenceSupport {
                    quote_text: "wisdom is limitless because the growth of knowledge is open ended".to_string(),
                    speaker_name: Some("David".to_string()),
                }],
                chapter_index: 0,
            }],
        }],
    };

    let config = PipelineConfig::default();
    let report = build_coverage_report(&document, &transcript, &roster, &config);
    tracing::info!(is_feasible = report.is_feasible, chapters = report.chapters.len(), "coverage report computed");

    if !report.is_feasible {
        for note in &report.notes {
            tracing::warn!(%note, "preflight note");
        }
    }

    let adapter = ideas_edition_core::adapters::RigGenerationAdapter::from_env(&config);
    let cancellation = tokio_util::sync::CancellationToken::new();

    match generate_chapter(1, &document, &transcript, &roster, &config, &adapter, &cancellation).await {
        Ok(draft) => println!("{}", ideas_edition_core::application::use_cases::render(&draft)),
        Err(error) => {
            tracing::error!(%error, "chapter generation failed");
            let title = document.chapters[0].chapter_title.clone().unwrap_or_else(|| "Untitled".to_string());
            println!("{}", ideas_edition_core::ChapterDraft::render_failed(1, &title, &error.to_string()));
        }
    }

    Ok(())
}
