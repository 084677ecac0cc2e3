//! Enforcer: validates every surviving quotation against the whitelist.
//!
//! This is the pipeline's hard guarantee. No quotation, blockquote or
//! inline, survives unless it is byte-for-byte identical to some
//! `WhitelistQuote.quote_text`; anything else is replaced, paraphrased, or
//! dropped — never passed through unchecked.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial enforcer for the drafting pipeline.

use crate::domain::{EnforcementResult, WhitelistQuote};
use evidence_map::SpeakerRole;

/// Runs all four enforcement steps over `markdown` in order and returns the
/// resulting text plus a trace of every replacement and drop.
pub fn enforce(markdown: &str, whitelist: &[WhitelistQuote], chapter_index: u32) -> EnforcementResult {
    let mut result = EnforcementResult::default();

    let stripped = strip_stray_blockquotes(markdown);
    let validated = validate_blockquotes(&stripped, whitelist, chapter_index, &mut result);
    let inline_handled = handle_inline_quotations(&validated, whitelist, chapter_index, &mut result);
    let final_text = filter_core_claims(&inline_handled, whitelist, chapter_index, &mut result);

    result.text = final_text;
    result
}

const KEY_EXCERPTS_HEADING: &str = "### Key Excerpts";
const CORE_CLAIMS_HEADING: &str = "### Core Claims";

/// Step 1: deletes any `> ...` line before the Key Excerpts heading or after
/// the Core Claims heading starts. When a heading is absent, its boundary
/// imposes no stripping on that side — the Key Excerpts block the model is
/// not allowed to write in the first place has nothing to strip around.
fn strip_stray_blockquotes(markdown: &str) -> std::string::String {
    let lines: std::vec::Vec<&str> = markdown.lines().collect();
    let key_excerpts_index = lines.iter().position(|line| line.trim() == KEY_EXCERPTS_HEADING);
    let core_claims_index = lines.iter().position(|line| line.trim() == CORE_CLAIMS_HEADING);

    let mut out = std::vec::Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let before_key_excerpts = key_excerpts_index.is_some_and(|boundary| index < boundary);
        let after_core_claims = core_claims_index.is_some_and(|boundary| index >= boundary);
        let in_stray_zone = before_key_excerpts || after_core_claims;

        if in_stray_zone && line.trim_start().starts_with("> ") {
            continue;
        }
        out.push(*line);
    }
    out.join("\n")
}

/// Step 2: validates `> "TEXT"\n> — SPEAKER` pairs against the whitelist,
/// replacing matched pairs with the exact raw quote and normalized
/// attribution, deleting unmatched pairs entirely.
fn validate_blockquotes(markdown: &str, whitelist: &[WhitelistQuote], chapter_index: u32, trace: &mut EnforcementResult) -> std::string::String {
    let quote_line_re = regex::Regex::new(r#"^> "(.+)"$"#).expect("static blockquote quote regex");
    let speaker_line_re = regex::Regex::new(r"^> — (.+?)(?:\s*\(.*\))?$").expect("static blockquote speaker regex");

    let lines: std::vec::Vec<&str> = markdown.lines().collect();
    let mut out = std::vec::Vec::with_capacity(lines.len());
    let mut index = 0usize;
    while index < lines.len() {
        let quote_captures = quote_line_re.captures(lines[index]);
        let speaker_line = lines.get(index + 1).copied();
        let speaker_captures = speaker_line.and_then(|line| speaker_line_re.captures(line));

        match (quote_captures, speaker_captures) {
            (Some(quote_cap), Some(speaker_cap)) => {
                let quoted_text = quote_cap[1].to_string();
                let parsed_speaker = speaker_cap[1].trim().to_string();
                let canonical_key = canonical_text::casefold_for_match(&canonical_text::canonicalize(&quoted_text));

                match resolve_quote(whitelist, &canonical_key, Some(&parsed_speaker), chapter_index, false) {
                    Some(matched) => {
                        out.push(std::format!("> \"{}\"", matched.quote_text));
                        out.push(std::format!("> — {} ({})", matched.speaker.display_name, matched.speaker.role));
                        trace.replaced.push(quoted_text);
                    }
                    None => {
                        tracing::debug!(chapter_index, quote = %quoted_text, speaker = %parsed_speaker, "dropping unmatched blockquote");
                        trace.dropped.push(quoted_text);
                    }
                }
                index += 2;
            }
            _ => {
                out.push(lines[index]);
                index += 1;
            }
        }
    }
    out.join("\n")
}

/// Step 3: for every `"..."` run of at least 5 characters inside a narrative
/// (non-blockquote) line, replaces it with the whitelist's exact text if
/// matched, or strips the surrounding quote marks (keeping the text as a
/// paraphrase) if unmatched.
fn handle_inline_quotations(markdown: &str, whitelist: &[WhitelistQuote], chapter_index: u32, trace: &mut EnforcementResult) -> std::string::String {
    let inline_re = regex::Regex::new(r#""([^"]{5,})""#).expect("static inline quotation regex");

    markdown
        .lines()
        .map(|line| {
            if line.trim_start().starts_with("> ") {
                return line.to_string();
            }
            let mut rewritten = std::string::String::with_capacity(line.len());
            let mut last_end = 0usize;
            for capture in inline_re.captures_iter(line) {
                let whole = capture.get(0).expect("capture group 0 always present");
                let inner = capture[1].to_string();
                rewritten.push_str(&line[last_end..whole.start()]);

                let canonical_key = canonical_text::casefold_for_match(&canonical_text::canonicalize(&inner));
                match resolve_quote(whitelist, &canonical_key, None, chapter_index, false) {
                    Some(matched) => {
                        rewritten.push('"');
                        rewritten.push_str(&matched.quote_text);
                        rewritten.push('"');
                        trace.replaced.push(inner);
                    }
                    None => {
                        tracing::debug!(chapter_index, quote = %inner, "paraphrasing unverifiable inline quotation");
                        rewritten.push_str(&inner);
                        trace.replaced.push(inner);
                    }
                }
                last_end = whole.end();
            }
            rewritten.push_str(&line[last_end..]);
            rewritten
        })
        .collect::<std::vec::Vec<_>>()
        .join("\n")
}

/// Step 4: drops any Core Claims bullet whose supporting quote is absent
/// from the whitelist or whose speaker role is not GUEST. Inserts a
/// placeholder if a Core Claims section ends up with no surviving bullets.
fn filter_core_claims(markdown: &str, whitelist: &[WhitelistQuote], chapter_index: u32, trace: &mut EnforcementResult) -> std::string::String {
    let bullet_re = regex::Regex::new(r#"^- \*\*(.+?)\*\*: "(.+)"$"#).expect("static core claims bullet regex");
    let lines: std::vec::Vec<&str> = markdown.lines().collect();
    let core_claims_index = lines.iter().position(|line| line.trim() == CORE_CLAIMS_HEADING);

    let mut out = std::vec::Vec::with_capacity(lines.len());
    let mut surviving_bullets_after_heading = 0usize;
    let mut saw_bullet_at_all = false;

    for (index, line) in lines.iter().enumerate() {
        let Some(captures) = bullet_re.captures(line) else {
            out.push(line.to_string());
            continue;
        };
        saw_bullet_at_all = true;
        let claim_text = captures[1].to_string();
        let quote_text = captures[2].to_string();
        let canonical_key = canonical_text::casefold_for_match(&canonical_text::canonicalize(&quote_text));

        match resolve_quote(whitelist, &canonical_key, None, chapter_index, true) {
            Some(matched) => {
                out.push(std::format!("- **{claim_text}**: \"{}\"", matched.quote_text));
                trace.replaced.push(quote_text);
                if core_claims_index.is_some_and(|boundary| index > boundary) {
                    surviving_bullets_after_heading += 1;
                }
            }
            None => {
                tracing::debug!(chapter_index, claim = %claim_text, quote = %quote_text, "dropping core claim: quote not whitelisted or speaker not GUEST");
                trace.dropped.push(quote_text);
            }
        }
    }

    if let Some(boundary) = core_claims_index {
        if saw_bullet_at_all && surviving_bullets_after_heading == 0 {
            out.insert(boundary + 1, std::string::String::from("*No fully grounded claims available for this chapter.*"));
        }
    }

    out.join("\n")
}

/// Resolves a canonical quote text to a whitelist entry. When `parsed_speaker`
/// is given, an entry whose display name matches it wins outright; otherwise
/// an entry scoped to the current chapter wins; otherwise the first entry in
/// stable `quote_id` order. When `require_guest` is set (Core Claims), only
/// GUEST-role candidates are considered at all.
pub(crate) fn resolve_quote<'a>(
    whitelist: &'a [WhitelistQuote],
    canonical_key: &str,
    parsed_speaker: std::option::Option<&str>,
    chapter_index: u32,
    require_guest: bool,
) -> std::option::Option<&'a WhitelistQuote> {
    let mut candidates: std::vec::Vec<&WhitelistQuote> = whitelist.iter().filter(|q| q.quote_canonical == canonical_key).collect();
    if require_guest {
        candidates.retain(|q| q.speaker.role == SpeakerRole::Guest);
    }
    if candidates.is_empty() {
        return std::option::Option::None;
    }

    if let Some(speaker_name) = parsed_speaker {
        if let Some(exact) = candidates.iter().find(|q| q.speaker.display_name.eq_ignore_ascii_case(speaker_name)) {
            return std::option::Option::Some(exact);
        }
    }

    if let Some(in_chapter) = candidates.iter().find(|q| q.is_scoped_to_chapter(chapter_index)) {
        return std::option::Option::Some(in_chapter);
    }

    candidates.sort_by(|a, b| a.quote_id.cmp(&b.quote_id));
    candidates.into_iter().next()
}
