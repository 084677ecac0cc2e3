//! Explicit pipeline configuration.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial PipelineConfig for the drafting pipeline.

/// Coverage thresholds and excerpt counts for one coverage level.
#[derive(Debug, Clone, Copy)]
pub struct CoverageLevelConfig {
    pub min_usable_quotes: usize,
    pub min_quote_words_per_claim: f64,
    pub target_words: u32,
    pub excerpt_count: usize,
}

/// Explicit configuration record for the pipeline. Dynamic dict-typed
/// config objects in the source system map here to enumerated fields, not a
/// map — every knob the pipeline reads is named and typed.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub strong: CoverageLevelConfig,
    pub medium: CoverageLevelConfig,
    pub weak: CoverageLevelConfig,
    /// Minimum usable quotes per chapter for the CoverageReport feasibility
    /// verdict to PASS.
    pub min_usable_quotes_for_feasibility: usize,
    /// Per-provider retry cap (§5: "Retries capped at 2 per provider").
    pub max_retries_per_provider: u32,
    /// Base backoff before the first retry; doubled with jitter on each
    /// subsequent attempt.
    pub base_backoff: std::time::Duration,
    /// Total per-chapter wall time cap.
    pub per_chapter_timeout: std::time::Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strong: CoverageLevelConfig {
                min_usable_quotes: 5,
                min_quote_words_per_claim: 50.0,
                target_words: 800,
                excerpt_count: 4,
            },
            medium: CoverageLevelConfig {
                min_usable_quotes: 3,
                min_quote_words_per_claim: 30.0,
                target_words: 500,
                excerpt_count: 3,
            },
            weak: CoverageLevelConfig {
                min_usable_quotes: 0,
                min_quote_words_per_claim: 0.0,
                target_words: 250,
                excerpt_count: 2,
            },
            min_usable_quotes_for_feasibility: 2,
            max_retries_per_provider: 2,
            base_backoff: std::time::Duration::from_millis(500),
            per_chapter_timeout: std::time::Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_spec_thresholds() {
        // Test: Validates that PipelineConfig::default carries the exact numeric thresholds and
        // budgets named in the Coverage Analyzer and Excerpt Selector sections of the specification.
        // Justification: These constants are load-bearing for the S1-S6 scenarios and the
        // quantified invariants; a default drift here would silently break coverage classification.
        let config = PipelineConfig::default();
        std::assert_eq!(config.strong.min_usable_quotes, 5);
        std::assert_eq!(config.strong.target_words, 800);
        std::assert_eq!(config.strong.excerpt_count, 4);
        std::assert_eq!(config.medium.min_usable_quotes, 3);
        std::assert_eq!(config.medium.target_words, 500);
        std::assert_eq!(config.weak.target_words, 250);
        std::assert_eq!(config.weak.excerpt_count, 2);
        std::assert_eq!(config.max_retries_per_provider, 2);
    }
}
