//! Typed model of the Evidence-Map JSON document (see §6.2 of the pipeline spec).
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial document model.

/// Top-level Evidence-Map document: an LLM-produced catalog of claims and
/// supporting quotes, grouped by chapter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EvidenceMapDocument {
    pub version: u32,
    pub project_id: std::string::String,
    pub transcript_hash: std::string::String,
    pub chapters: std::vec::Vec<ChapterEvidence>,
}

/// One chapter's worth of claims as reported by the Evidence-Map builder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChapterEvidence {
    pub chapter_index: u32,
    #[serde(default)]
    pub chapter_title: std::option::Option<std::string::String>,
    pub claims: std::vec::Vec<EvidenceEntry>,
}

/// A single claim and its supporting quotes, scoped to one chapter.
///
/// This is the `EvidenceEntry` of the data model: {chapter_index, claim,
/// support[]}. `chapter_index` is carried alongside rather than duplicated
/// from the parent [`ChapterEvidence`] so that whitelist construction can
/// treat a flat stream of entries without walking back up to the chapter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, hexser::HexEntity)]
pub struct EvidenceEntry {
    pub id: std::string::String,
    pub claim: std::string::String,
    pub support: std::vec::Vec<EvidenceSupport>,
    #[serde(skip)]
    pub chapter_index: u32,
}

/// One quote offered in support of a claim, with its claimed speaker.
///
/// `speaker` is `None` or empty when the Evidence-Map builder could not
/// attribute the quote; the whitelist builder discards such support entries
/// rather than guessing an attribution.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EvidenceSupport {
    #[serde(rename = "quote")]
    pub quote_text: std::string::String,
    #[serde(rename = "speaker")]
    pub speaker_name: std::option::Option<std::string::String>,
}

impl EvidenceMapDocument {
    /// Flattens the document into a stream of entries with `chapter_index`
    /// populated from the enclosing chapter, the shape the whitelist builder
    /// consumes.
    pub fn flatten_entries(&self) -> std::vec::Vec<EvidenceEntry> {
        let mut out = std::vec::Vec::new();
        for chapter in &self.chapters {
            for claim in &chapter.claims {
                let mut entry = claim.clone();
                entry.chapter_index = chapter.chapter_index;
                out.push(entry);
            }
        }
        out
    }
}
