//! Evidence-Map document model and speaker roster resolution.
//!
//! The Evidence-Map builder itself is an external collaborator (an LLM call
//! over transcript + outline); this crate only models the document it
//! produces and resolves the free-text speaker names inside it to stable
//! [`speaker::SpeakerRef`]s. The document is untrusted input: nothing here
//! verifies that a quote actually occurs in any transcript, that's the
//! whitelist builder's job.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial Evidence-Map document model for the drafting pipeline.

pub mod document;
pub mod error;
pub mod parsing;
pub mod speaker;

pub use document::{ChapterEvidence, EvidenceMapDocument, EvidenceEntry, EvidenceSupport};
pub use error::EvidenceMapError;
pub use parsing::tolerant_parse;
pub use speaker::{Roster, SpeakerRef, SpeakerRole};
