//! ChapterCoverage and CoverageReport: per-chapter evidence density metrics.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial coverage types for the drafting pipeline.

/// Chapter-level density of usable evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CoverageLevel {
    Weak,
    Medium,
    Strong,
}

impl std::fmt::Display for CoverageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CoverageLevel::Strong => "STRONG",
            CoverageLevel::Medium => "MEDIUM",
            CoverageLevel::Weak => "WEAK",
        };
        f.write_str(label)
    }
}

/// The generation strategy a chapter's coverage level implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Normal,
    Thin,
    ExcerptOnly,
}

/// Deterministic per-chapter coverage metrics computed by the Coverage
/// Analyzer, before any model call is made.
#[derive(Debug, Clone)]
pub struct ChapterCoverage {
    pub chapter_index: u32,
    pub level: CoverageLevel,
    pub usable_quotes: usize,
    pub quote_words_per_claim: f64,
    pub quotes_per_claim: f64,
    pub target_words: u32,
    pub generation_mode: GenerationMode,
}

/// Corpus-level snapshot used for preflight gating.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub chapters: std::vec::Vec<ChapterCoverage>,
    pub is_feasible: bool,
    pub notes: std::vec::Vec<std::string::String>,
}
