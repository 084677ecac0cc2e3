//! Assembler: composes the final chapter markdown and asserts the
//! post-assembly structural invariants.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial assembler for the drafting pipeline.

use crate::domain::{CoreClaim, PipelineError, WhitelistQuote};

const KEY_EXCERPTS_HEADING: &str = "### Key Excerpts";
const CORE_CLAIMS_HEADING: &str = "### Core Claims";
const NO_CLAIMS_PLACEHOLDER: &str = "*No fully grounded claims available for this chapter.*";
const NO_EXCERPTS_PLACEHOLDER: &str = "*No verbatim excerpts available for this chapter.*";

/// Composes one chapter's final markdown: heading, enforced narrative minus
/// any headings the model wrote despite being told not to, a freshly
/// rendered Key Excerpts block (never the model's own rendering), and the
/// enforced Core Claims block or its placeholder.
pub fn assemble_chapter(chapter_index: u32, title: &str, enforced_narrative: &str, excerpts: &[WhitelistQuote], core_claims: &[CoreClaim]) -> std::string::String {
    let narrative = strip_trailing_sections(enforced_narrative);

    let mut out = std::string::String::new();
    out.push_str(&std::format!("## Chapter {chapter_index}: {title}\n\n"));
    out.push_str(narrative.trim_end());
    out.push_str("\n\n");

    out.push_str(KEY_EXCERPTS_HEADING);
    out.push_str("\n\n");
    if excerpts.is_empty() {
        out.push_str(NO_EXCERPTS_PLACEHOLDER);
        out.push('\n');
    } else {
        for excerpt in excerpts {
            out.push_str(&std::format!("> \"{}\"\n> — {} ({})\n\n", excerpt.quote_text, excerpt.speaker.display_name, excerpt.speaker.role));
        }
    }
    out.push('\n');

    out.push_str(CORE_CLAIMS_HEADING);
    out.push_str("\n\n");
    if core_claims.is_empty() {
        out.push_str(NO_CLAIMS_PLACEHOLDER);
        out.push('\n');
    } else {
        for claim in core_claims {
            out.push_str(&std::format!("- **{}**: \"{}\"\n", claim.claim_text, claim.supporting_quote.quote_text));
        }
    }

    trim_trailing_blank_lines(&out)
}

/// Re-renders a [`crate::domain::ChapterDraft`]'s final markdown from its
/// stored fields. Used by callers that persist only the structured draft and
/// need the displayable markdown on demand.
pub fn render(draft: &crate::domain::ChapterDraft) -> std::string::String {
    assemble_chapter(draft.effective_index + 1, &draft.title, &draft.narrative, &draft.key_excerpts, &draft.core_claims)
}

pub(crate) fn strip_trailing_sections(text: &str) -> std::string::String {
    let lines: std::vec::Vec<&str> = text.lines().collect();
    let cut = lines.iter().position(|line| line.trim() == KEY_EXCERPTS_HEADING || line.trim() == CORE_CLAIMS_HEADING);
    match cut {
        std::option::Option::Some(index) => lines[..index].join("\n"),
        std::option::Option::None => text.to_string(),
    }
}

fn trim_trailing_blank_lines(text: &str) -> std::string::String {
    let mut trimmed = text.to_string();
    while trimmed.ends_with('\n') {
        trimmed.pop();
    }
    trimmed.push('\n');
    trimmed
}

/// Asserts the three post-assembly invariants of §4.8. A violation indicates
/// a bug in the pipeline, not a data problem, so it is reported as an
/// `InvariantViolation` rather than recovered from silently.
pub fn validate_invariants(chapter_index: u32, markdown: &str, whitelist: &[WhitelistQuote]) -> std::result::Result<(), PipelineError> {
    check_heading_not_vacuous(chapter_index, markdown, KEY_EXCERPTS_HEADING, CORE_CLAIMS_HEADING)?;
    check_core_claims_not_vacuous(chapter_index, markdown)?;
    check_inline_quotations_whitelisted(chapter_index, markdown, whitelist)?;
    std::result::Result::Ok(())
}

fn check_heading_not_vacuous(chapter_index: u32, markdown: &str, heading: &str, next_heading: &str) -> std::result::Result<(), PipelineError> {
    let lines: std::vec::Vec<&str> = markdown.lines().collect();
    let Some(start) = lines.iter().position(|line| line.trim() == heading) else {
        return std::result::Result::Ok(());
    };
    let end = lines.iter().skip(start + 1).position(|line| line.trim() == next_heading).map(|offset| start + 1 + offset).unwrap_or(lines.len());
    let has_content = lines[start + 1..end].iter().any(|line| !line.trim().is_empty());
    if has_content {
        std::result::Result::Ok(())
    } else {
        std::result::Result::Err(PipelineError::InvariantViolation {
            chapter_index,
            invariant: std::format!("{heading} heading followed by only whitespace"),
        })
    }
}

fn check_core_claims_not_vacuous(chapter_index: u32, markdown: &str) -> std::result::Result<(), PipelineError> {
    let lines: std::vec::Vec<&str> = markdown.lines().collect();
    let Some(start) = lines.iter().position(|line| line.trim() == CORE_CLAIMS_HEADING) else {
        return std::result::Result::Ok(());
    };
    let section: std::vec::Vec<&str> = lines[start + 1..].to_vec();
    let has_bullet = section.iter().any(|line| line.trim_start().starts_with("- **"));
    let has_placeholder = section.iter().any(|line| line.trim() == NO_CLAIMS_PLACEHOLDER);
    if has_bullet || has_placeholder {
        std::result::Result::Ok(())
    } else {
        std::result::Result::Err(PipelineError::InvariantViolation {
            chapter_index,
            invariant: std::string::String::from("Core Claims section empty and missing placeholder"),
        })
    }
}

fn check_inline_quotations_whitelisted(chapter_index: u32, markdown: &str, whitelist: &[WhitelistQuote]) -> std::result::Result<(), PipelineError> {
    let lines: std::vec::Vec<&str> = markdown.lines().collect();
    let key_excerpts_index = lines.iter().position(|line| line.trim() == KEY_EXCERPTS_HEADING);
    let inline_re = regex::Regex::new(r#""([^"]{5,})""#).expect("static inline quotation regex");

    for (index, line) in lines.iter().enumerate() {
        let outside_protected_sections = key_excerpts_index.is_none_or(|boundary| index < boundary);
        if !outside_protected_sections || line.trim_start().starts_with("> ") || line.trim_start().starts_with("- **") {
            continue;
        }
        for capture in inline_re.captures_iter(line) {
            let inner = &capture[1];
            let canonical_key = canonical_text::casefold_for_match(&canonical_text::canonicalize(inner));
            if !whitelist.iter().any(|q| q.quote_canonical == canonical_key) {
                return std::result::Result::Err(PipelineError::InvariantViolation {
                    chapter_index,
                    invariant: std::format!("unwhitelisted inline quotation survived enforcement: \"{inner}\""),
                });
            }
        }
    }
    std::result::Result::Ok(())
}
