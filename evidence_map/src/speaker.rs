//! Speaker roster resolution: free-text speaker names to stable SpeakerRefs.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial roster resolution for the drafting pipeline.

/// The role a speaker plays in a given project, derived from per-project
/// host/guest rosters. Unknown names default to `Unclear` rather than any
/// specific role, so that attribution failures fail closed instead of
/// silently being treated as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SpeakerRole {
    Host,
    Guest,
    Caller,
    Clip,
    Unclear,
}

impl std::fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SpeakerRole::Host => "HOST",
            SpeakerRole::Guest => "GUEST",
            SpeakerRole::Caller => "CALLER",
            SpeakerRole::Clip => "CLIP",
            SpeakerRole::Unclear => "UNCLEAR",
        };
        f.write_str(label)
    }
}

/// A stable reference to a speaker. Downstream components attribute quotes
/// to this, never to a free-text name, so that two spellings of the same
/// name resolve to one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SpeakerRef {
    pub speaker_id: std::string::String,
    pub display_name: std::string::String,
    pub role: SpeakerRole,
}

/// Per-project lists of host and guest display names, used to resolve a
/// free-text speaker name to a role. Comparison is case-insensitive.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Roster {
    pub hosts: std::vec::Vec<std::string::String>,
    pub guests: std::vec::Vec<std::string::String>,
}

impl Roster {
    pub fn new(hosts: std::vec::Vec<std::string::String>, guests: std::vec::Vec<std::string::String>) -> Self {
        Self { hosts, guests }
    }

    /// Resolves a free-text speaker name to a [`SpeakerRef`]. Names absent
    /// from both lists resolve to `SpeakerRole::Unclear` with their
    /// original spelling preserved as the display name.
    pub fn resolve(&self, name: &str) -> SpeakerRef {
        let trimmed = name.trim();
        let role = if self.contains_case_insensitive(&self.hosts, trimmed) {
            SpeakerRole::Host
        } else if self.contains_case_insensitive(&self.guests, trimmed) {
            SpeakerRole::Guest
        } else {
            SpeakerRole::Unclear
        };
        SpeakerRef {
            speaker_id: slugify(trimmed),
            display_name: trimmed.to_string(),
            role,
        }
    }

    fn contains_case_insensitive(&self, names: &[std::string::String], needle: &str) -> bool {
        names.iter().any(|candidate| candidate.eq_ignore_ascii_case(needle))
    }
}

fn slugify(name: &str) -> std::string::String {
    let mut slug = std::string::String::with_capacity(name.len());
    let mut last_was_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && !slug.is_empty() {
            slug.push('-');
            last_was_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
