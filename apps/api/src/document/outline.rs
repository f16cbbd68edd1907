//! Display outline: which sections are shown, in which order, with which content.
//!
//! Both the preview renderer and the PDF exporter build their output from
//! [`outline`], so section selection, ordering and skills tokenizing can never
//! drift between the two back ends.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::document::cleanup::{clean_for_display, strip_bold, BodyLine};
use crate::document::sections::{CanonicalSection, SectionKey, SectionMap};

/// Fixed display order, independent of source order.
pub const DISPLAY_ORDER: [CanonicalSection; 6] = [
    CanonicalSection::Summary,
    CanonicalSection::Education,
    CanonicalSection::Skills,
    CanonicalSection::Experience,
    CanonicalSection::Projects,
    CanonicalSection::Certifications,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Lines { lines: Vec<BodyLine> },
    Chips { chips: Vec<String> },
}

impl SectionContent {
    /// Number of visual rows before wrapping; used to size obscured placeholders.
    pub fn row_count(&self) -> usize {
        match self {
            SectionContent::Lines { lines } => lines.len(),
            SectionContent::Chips { chips } => chips.len().div_ceil(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineSection {
    pub key: SectionKey,
    pub title: String,
    pub content: SectionContent,
}

static SKILL_SEPARATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[,;\n\r•▸►▶▪▫◦‣➤➢➜→⇒✓✔✅★☆◆◇■□●○⚫»·❖✦✧🔹🔸👉⁃|]")
        .expect("skill separator regex is valid")
});

/// Splits a skills body into chips on commas, newlines and bullet glyphs.
pub fn tokenize_skills(body: &str) -> Vec<String> {
    SKILL_SEPARATORS
        .split(body)
        .map(|token| {
            let token = strip_bold(token);
            token
                .trim()
                .trim_start_matches(|c: char| c == '-' || c == '*' || c == '+')
                .trim()
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn content_for(key: &SectionKey, body: &str) -> SectionContent {
    match key {
        SectionKey::Canonical(CanonicalSection::Skills) => SectionContent::Chips {
            chips: tokenize_skills(body),
        },
        _ => SectionContent::Lines {
            lines: clean_for_display(body),
        },
    }
}

/// Finds the entry for a display slot: the exact canonical key first, then
/// the first unclaimed free-form heading containing the section token.
fn find_slot<'a>(
    map: &'a SectionMap,
    section: CanonicalSection,
    claimed: &[SectionKey],
) -> Option<(&'a SectionKey, &'a str)> {
    let exact = SectionKey::Canonical(section);
    if let Some(found) = map.iter().find(|(k, _)| **k == exact && !claimed.contains(k)) {
        return Some(found);
    }
    map.iter().find(|(k, _)| match k {
        SectionKey::Other(label) => label.contains(section.token()) && !claimed.contains(k),
        _ => false,
    })
}

/// Builds the display outline for a structured section map.
///
/// The six fixed slots come first; the Summary slot falls back to OBJECTIVE.
/// Sections no slot claimed (free-form headings, a second objective) follow in
/// source order. HEADER is never part of the outline.
pub fn outline(map: &SectionMap) -> Vec<OutlineSection> {
    let mut claimed: Vec<SectionKey> = Vec::new();
    let mut sections = Vec::new();

    for slot in DISPLAY_ORDER {
        let found = find_slot(map, slot, &claimed).or_else(|| {
            (slot == CanonicalSection::Summary)
                .then(|| find_slot(map, CanonicalSection::Objective, &claimed))
                .flatten()
        });
        if let Some((key, body)) = found {
            claimed.push(key.clone());
            let title = match key {
                SectionKey::Other(_) => key.title(),
                _ => slot.title().to_string(),
            };
            sections.push(OutlineSection {
                key: key.clone(),
                title,
                content: content_for(&SectionKey::Canonical(slot), body),
            });
        }
    }

    for (key, body) in map.iter() {
        if *key == SectionKey::Header || claimed.contains(key) {
            continue;
        }
        sections.push(OutlineSection {
            key: key.clone(),
            title: key.title(),
            content: content_for(key, body),
        });
    }

    sections.retain(|s| s.content.row_count() > 0);
    sections
}
