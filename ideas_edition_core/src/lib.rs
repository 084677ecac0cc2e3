//! Ideas-Edition drafting pipeline: turns an interview transcript and a
//! themed Evidence-Map outline into a chaptered draft in which every
//! surviving quotation is a provable verbatim substring of the transcript.
//!
//! The public surface is intentionally narrow: [`build_coverage_report`] for
//! preflight feasibility gating, [`generate_chapter`] to draft one chapter,
//! and [`enforce`] exposed directly for callers that already hold raw model
//! output and want to re-run grounding enforcement without regenerating it.
//! Everything else (the HTTP/job layer, persistence, export, transcript
//! cleanup, Q&A-edition generation) lives outside this crate.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial public surface for the drafting pipeline.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

pub use application::use_cases::{build_coverage_report, enforce, generate_chapter};
pub use application::GenerationAdapterPort;
pub use config::{CoverageLevelConfig, PipelineConfig};
pub use domain::{
    word_count, ChapterCoverage, ChapterDraft, CoreClaim, CoverageLevel, CoverageReport,
    EnforcementResult, GenerationMode, PipelineError, TranscriptPair, WhitelistQuote,
};
