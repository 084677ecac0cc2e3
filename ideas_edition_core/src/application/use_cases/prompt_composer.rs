//! Prompt Composer: assembles the chapter-generation prompt from
//! deterministically selected excerpts, never leaving quote selection to the
//! model.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial prompt composer for the drafting pipeline.

use crate::domain::{GenerationMode, WhitelistQuote};

/// Everything the Prompt Composer needs to build one chapter's prompt.
pub struct ChapterPromptInput<'a> {
    pub chapter_title: &'a str,
    pub claims: &'a [std::string::String],
    pub excerpts: &'a [WhitelistQuote],
    pub target_words: u32,
    pub generation_mode: GenerationMode,
}

/// Builds the model prompt for one chapter. The excerpts block is rendered
/// verbatim from the whitelist; the model is instructed to paraphrase rather
/// than quote inline, and never to invent quotations of its own.
pub fn compose_prompt(input: &ChapterPromptInput<'_>) -> std::string::String {
    let mut prompt = std::string::String::new();

    prompt.push_str(&std::format!("Chapter title: {}\n\n", input.chapter_title));

    prompt.push_str("Claims to develop in this chapter:\n");
    if input.claims.is_empty() {
        prompt.push_str("(none provided)\n");
    } else {
        for claim in input.claims {
            prompt.push_str(&std::format!("- {claim}\n"));
        }
    }
    prompt.push('\n');

    prompt.push_str("Key Excerpts available for this chapter (for reference only — do not rewrite, reorder, or invent additional excerpts; the excerpts section of the final output is rendered separately from the source quotes below):\n\n");
    if input.excerpts.is_empty() {
        prompt.push_str("(no excerpts available for this chapter)\n\n");
    } else {
        for excerpt in input.excerpts {
            prompt.push_str(&std::format!("> \"{}\"\n> — {} ({})\n\n", excerpt.quote_text, excerpt.speaker.display_name, excerpt.speaker.role));
        }
    }

    prompt.push_str(&std::format!("Target length: approximately {} words. Generation mode: {}.\n\n", input.target_words, mode_label(input.generation_mode)));

    prompt.push_str(
        "Write narrative prose paraphrasing the claims above using the excerpts as grounding. Do \
         not use quotation marks in the narrative paragraphs; paraphrase every idea drawn from \
         the excerpts instead of quoting it inline. After the narrative, write a \"### Core \
         Claims\" section listing each claim as a bullet in the exact form \
         `- **{claim text}**: \"{supporting quote, copied verbatim from the excerpts above}\"`. \
         Do not write a \"### Key Excerpts\" heading yourself — that section is assembled \
         afterward from the excerpts above. Never invent, combine, or alter a quotation; every \
         quotation you write, in the Core Claims section or anywhere else, must be copied \
         character-for-character from the excerpts above.\n",
    );

    prompt
}

fn mode_label(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Normal => "normal",
        GenerationMode::Thin => "thin",
        GenerationMode::ExcerptOnly => "excerpt_only",
    }
}
