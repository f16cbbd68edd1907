//! Section Parser: splits generated résumé text into canonical sections.
//!
//! # Heading recognition
//! A heading is a whole line that, after removing 1–3 leading `#`, bold
//! markers, leading decorative glyphs and a trailing `:`, matches one entry of
//! [`HEADING_SYNONYMS`] case-insensitively. A `#`-prefixed line that matches
//! nothing is still a heading and keeps its uppercased text as the key.
//!
//! # Fallback
//! [`analyze`] degrades to [`ParsedDocument::Raw`] when fewer than two content
//! sections are found, so unexpected generator output is always shown whole.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

// ────────────────────────────────────────────────────────────────────────────
// Keys
// ────────────────────────────────────────────────────────────────────────────

/// The seven normalized résumé sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalSection {
    Summary,
    Objective,
    Education,
    Skills,
    Experience,
    Projects,
    Certifications,
}

impl CanonicalSection {
    pub const ALL: [CanonicalSection; 7] = [
        CanonicalSection::Summary,
        CanonicalSection::Objective,
        CanonicalSection::Education,
        CanonicalSection::Skills,
        CanonicalSection::Experience,
        CanonicalSection::Projects,
        CanonicalSection::Certifications,
    ];

    /// Uppercase key label, also the literal heading the PDF sanitizer emits.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalSection::Summary => "SUMMARY",
            CanonicalSection::Objective => "OBJECTIVE",
            CanonicalSection::Education => "EDUCATION",
            CanonicalSection::Skills => "SKILLS",
            CanonicalSection::Experience => "EXPERIENCE",
            CanonicalSection::Projects => "PROJECTS",
            CanonicalSection::Certifications => "CERTIFICATIONS",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CanonicalSection::Summary => "Summary",
            CanonicalSection::Objective => "Objective",
            CanonicalSection::Education => "Education",
            CanonicalSection::Skills => "Skills",
            CanonicalSection::Experience => "Experience",
            CanonicalSection::Projects => "Projects",
            CanonicalSection::Certifications => "Certifications",
        }
    }

    /// Substring used to match free-form headings onto this section
    /// (`"TECHNICAL PROJECTS"` contains `"PROJECT"`).
    pub fn token(&self) -> &'static str {
        match self {
            CanonicalSection::Summary => "SUMMARY",
            CanonicalSection::Objective => "OBJECTIVE",
            CanonicalSection::Education => "EDUCATION",
            CanonicalSection::Skills => "SKILL",
            CanonicalSection::Experience => "EXPERIENCE",
            CanonicalSection::Projects => "PROJECT",
            CanonicalSection::Certifications => "CERTIFICAT",
        }
    }
}

/// Key of a [`SectionMap`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKey {
    /// Text preceding the first heading (or the whole text in raw fallback).
    Header,
    Canonical(CanonicalSection),
    /// Unmatched `#` heading, uppercased.
    Other(String),
}

impl SectionKey {
    pub fn label(&self) -> &str {
        match self {
            SectionKey::Header => "HEADER",
            SectionKey::Canonical(c) => c.label(),
            SectionKey::Other(s) => s,
        }
    }

    /// Human-facing section title.
    pub fn title(&self) -> String {
        match self {
            SectionKey::Header => "Header".to_string(),
            SectionKey::Canonical(c) => c.title().to_string(),
            SectionKey::Other(s) => title_case(s),
        }
    }
}

impl From<CanonicalSection> for SectionKey {
    fn from(c: CanonicalSection) -> Self {
        SectionKey::Canonical(c)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SectionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

fn title_case(upper: &str) -> String {
    upper
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Synonym table
// ────────────────────────────────────────────────────────────────────────────

/// The single heading table. The parser, the PDF glyph sanitizer and the
/// outline all recognize headings through this list.
pub static HEADING_SYNONYMS: &[(&str, CanonicalSection)] = &[
    ("SUMMARY", CanonicalSection::Summary),
    ("PROFESSIONAL SUMMARY", CanonicalSection::Summary),
    ("CAREER SUMMARY", CanonicalSection::Summary),
    ("EXECUTIVE SUMMARY", CanonicalSection::Summary),
    ("ABOUT ME", CanonicalSection::Summary),
    ("ABOUT", CanonicalSection::Summary),
    ("PROFILE", CanonicalSection::Summary),
    ("PROFESSIONAL PROFILE", CanonicalSection::Summary),
    ("OBJECTIVE", CanonicalSection::Objective),
    ("CAREER OBJECTIVE", CanonicalSection::Objective),
    ("PROFESSIONAL OBJECTIVE", CanonicalSection::Objective),
    ("EDUCATION", CanonicalSection::Education),
    ("ACADEMIC BACKGROUND", CanonicalSection::Education),
    ("EDUCATIONAL BACKGROUND", CanonicalSection::Education),
    ("ACADEMICS", CanonicalSection::Education),
    ("EDUCATION & TRAINING", CanonicalSection::Education),
    ("SKILLS", CanonicalSection::Skills),
    ("TECHNICAL SKILLS", CanonicalSection::Skills),
    ("KEY SKILLS", CanonicalSection::Skills),
    ("CORE SKILLS", CanonicalSection::Skills),
    ("CORE COMPETENCIES", CanonicalSection::Skills),
    ("SKILLS & TOOLS", CanonicalSection::Skills),
    ("SKILLS & EXPERTISE", CanonicalSection::Skills),
    ("EXPERIENCE", CanonicalSection::Experience),
    ("WORK EXPERIENCE", CanonicalSection::Experience),
    ("PROFESSIONAL EXPERIENCE", CanonicalSection::Experience),
    ("RELEVANT EXPERIENCE", CanonicalSection::Experience),
    ("EMPLOYMENT HISTORY", CanonicalSection::Experience),
    ("WORK HISTORY", CanonicalSection::Experience),
    ("EMPLOYMENT", CanonicalSection::Experience),
    ("PROJECTS", CanonicalSection::Projects),
    ("KEY PROJECTS", CanonicalSection::Projects),
    ("PERSONAL PROJECTS", CanonicalSection::Projects),
    ("ACADEMIC PROJECTS", CanonicalSection::Projects),
    ("PROJECT EXPERIENCE", CanonicalSection::Projects),
    ("CERTIFICATIONS", CanonicalSection::Certifications),
    ("CERTIFICATES", CanonicalSection::Certifications),
    ("CERTIFICATION", CanonicalSection::Certifications),
    ("LICENSES & CERTIFICATIONS", CanonicalSection::Certifications),
    ("CERTIFICATIONS & LICENSES", CanonicalSection::Certifications),
    ("COURSES & CERTIFICATIONS", CanonicalSection::Certifications),
];

/// Longest free-form `#` heading still treated as a heading.
pub(crate) const MAX_OTHER_HEADING_CHARS: usize = 60;

/// Uppercases, unifies `AND`/`&` and collapses whitespace.
pub(crate) fn normalize_heading(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let upper = w.to_uppercase();
            if upper == "AND" {
                "&".to_string()
            } else {
                upper
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_decoration(c: char) -> bool {
    c.is_whitespace() || (!c.is_ascii() && !c.is_alphanumeric())
}

fn strip_bold(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix("**").or_else(|| s.strip_prefix("__")).unwrap_or(s);
    let s = s.strip_suffix("**").or_else(|| s.strip_suffix("__")).unwrap_or(s);
    s.trim()
}

/// Looks `candidate` up in the synonym table.
pub fn canonical_for(candidate: &str) -> Option<CanonicalSection> {
    let needle = normalize_heading(candidate);
    HEADING_SYNONYMS
        .iter()
        .find(|(synonym, _)| normalize_heading(synonym) == needle)
        .map(|(_, canonical)| *canonical)
}

/// Returns the section key if `line` is a heading.
pub fn recognize_heading(line: &str) -> Option<SectionKey> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes > 3 {
        return None;
    }
    let hashed = hashes > 0;
    let rest = trimmed[hashes..].trim_start();

    // Decoration may sit on either side of the label and after its colon.
    let rest = strip_bold(rest).trim_matches(is_decoration);
    let rest = strip_bold(rest);
    let rest = rest.strip_suffix(':').unwrap_or(rest);
    let rest = strip_bold(rest.trim_end_matches(is_decoration));
    if rest.is_empty() {
        return None;
    }

    if let Some(canonical) = canonical_for(rest) {
        return Some(SectionKey::Canonical(canonical));
    }
    if hashed && rest.chars().count() <= MAX_OTHER_HEADING_CHARS {
        return Some(SectionKey::Other(normalize_heading(rest)));
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Section map
// ────────────────────────────────────────────────────────────────────────────

/// Ordered, key-unique mapping from section key to section body.
///
/// Order is first appearance in the source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    entries: Vec<(SectionKey, String)>,
}

impl SectionMap {
    /// Appends `body` to `key`. Whitespace-only bodies are dropped; repeated
    /// keys are concatenated with a newline.
    pub fn append(&mut self, key: SectionKey, body: &str) {
        let body = body.trim();
        if body.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                existing.push('\n');
                existing.push_str(body);
            }
            None => self.entries.push((key, body.to_string())),
        }
    }

    /// A map holding `text` as a single HEADER blob.
    pub fn raw(text: &str) -> Self {
        let mut map = SectionMap::default();
        map.append(SectionKey::Header, text);
        map
    }

    pub fn get(&self, key: &SectionKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, body)| body.as_str())
    }

    pub fn canonical(&self, section: CanonicalSection) -> Option<&str> {
        self.get(&SectionKey::Canonical(section))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &SectionKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of sections other than HEADER.
    pub fn content_sections(&self) -> usize {
        self.keys().filter(|k| **k != SectionKey::Header).count()
    }

    /// True when at least two content sections were detected.
    pub fn is_structured(&self) -> bool {
        self.content_sections() >= 2
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, body) in &self.entries {
            map.serialize_entry(key.label(), body)?;
        }
        map.end()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

/// Single-pass scan of `text` into sections. Never fails.
pub fn parse(text: &str) -> SectionMap {
    let mut map = SectionMap::default();
    let mut current = SectionKey::Header;
    let mut body: Vec<&str> = Vec::new();

    for line in text.lines() {
        match recognize_heading(line) {
            Some(key) => {
                map.append(std::mem::replace(&mut current, key), &body.join("\n"));
                body.clear();
            }
            None => body.push(line),
        }
    }
    map.append(current, &body.join("\n"));
    map
}

/// Result of parsing plus the degrade-gracefully decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedDocument {
    Structured(SectionMap),
    /// Fewer than two content sections; the only key is HEADER holding the whole text.
    Raw(SectionMap),
}

impl ParsedDocument {
    pub fn sections(&self) -> &SectionMap {
        match self {
            ParsedDocument::Structured(map) | ParsedDocument::Raw(map) => map,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ParsedDocument::Raw(_))
    }

    /// Full text in raw mode, `None` when structured.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            ParsedDocument::Raw(map) => Some(map.get(&SectionKey::Header).unwrap_or_default()),
            ParsedDocument::Structured(_) => None,
        }
    }
}

/// Parses `text` and applies the raw-fallback policy.
pub fn analyze(text: &str) -> ParsedDocument {
    let map = parse(text);
    if map.is_structured() {
        ParsedDocument::Structured(map)
    } else {
        debug!(
            sections = map.content_sections(),
            "Section detection found too few headings; using raw fallback"
        );
        ParsedDocument::Raw(SectionMap::raw(text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: CanonicalSection) -> SectionKey {
        SectionKey::Canonical(c)
    }

    // ── recognize_heading ───────────────────────────────────────────────────

    #[test]
    fn test_plain_synonym_is_heading() {
        assert_eq!(
            recognize_heading("PROFESSIONAL SUMMARY"),
            Some(key(CanonicalSection::Summary))
        );
        assert_eq!(
            recognize_heading("Employment History"),
            Some(key(CanonicalSection::Experience))
        );
    }

    #[test]
    fn test_hashes_colon_and_bold_are_tolerated() {
        assert_eq!(recognize_heading("## Skills:"), Some(key(CanonicalSection::Skills)));
        assert_eq!(recognize_heading("**EDUCATION**"), Some(key(CanonicalSection::Education)));
        assert_eq!(recognize_heading("### **Projects:**"), Some(key(CanonicalSection::Projects)));
        assert_eq!(recognize_heading("  work experience  "), Some(key(CanonicalSection::Experience)));
    }

    #[test]
    fn test_decorative_glyphs_before_heading() {
        assert_eq!(recognize_heading("✅ Skills"), Some(key(CanonicalSection::Skills)));
        assert_eq!(recognize_heading("🎓 EDUCATION"), Some(key(CanonicalSection::Education)));
        assert_eq!(recognize_heading("## 📌 Certifications"), Some(key(CanonicalSection::Certifications)));
    }

    #[test]
    fn test_decorative_glyphs_after_heading() {
        assert_eq!(recognize_heading("SKILLS 🛠️"), Some(key(CanonicalSection::Skills)));
        assert_eq!(recognize_heading("EXPERIENCE 💼"), Some(key(CanonicalSection::Experience)));
        assert_eq!(recognize_heading("Skills —"), Some(key(CanonicalSection::Skills)));
        assert_eq!(recognize_heading("Skills: ✨"), Some(key(CanonicalSection::Skills)));
        assert_eq!(recognize_heading("**🎓 Education**"), Some(key(CanonicalSection::Education)));
        assert_eq!(recognize_heading("**Projects** 🚀"), Some(key(CanonicalSection::Projects)));
        assert_eq!(
            recognize_heading("## Languages 🌍"),
            Some(SectionKey::Other("LANGUAGES".to_string()))
        );
        assert_eq!(recognize_heading("## 🚀 ✨"), None);
    }

    #[test]
    fn test_and_ampersand_equivalent() {
        assert_eq!(
            recognize_heading("Licenses and Certifications"),
            Some(key(CanonicalSection::Certifications))
        );
    }

    #[test]
    fn test_four_hashes_not_heading() {
        assert_eq!(recognize_heading("#### Skills"), None);
        assert_eq!(recognize_heading("##Skills"), Some(key(CanonicalSection::Skills)));
    }

    #[test]
    fn test_unmatched_hash_heading_keeps_literal() {
        assert_eq!(
            recognize_heading("## Languages spoken"),
            Some(SectionKey::Other("LANGUAGES SPOKEN".to_string()))
        );
    }

    #[test]
    fn test_unmatched_plain_line_is_not_heading() {
        assert_eq!(recognize_heading("JANE DOE"), None);
        assert_eq!(recognize_heading("Built apps."), None);
        assert_eq!(recognize_heading("#"), None);
        assert_eq!(recognize_heading(""), None);
    }

    #[test]
    fn test_heading_with_inline_content_is_not_heading() {
        assert_eq!(recognize_heading("Skills: React, SQL"), None);
    }

    // ── parse ───────────────────────────────────────────────────────────────

    #[test]
    fn test_synonym_equivalence() {
        let a = parse("PROFESSIONAL SUMMARY\nX");
        let b = parse("ABOUT ME\nX");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a.canonical(CanonicalSection::Summary), Some("X"));
    }

    #[test]
    fn test_text_before_first_heading_goes_to_header() {
        let map = parse("Jane Doe\njane@x.com\nSUMMARY\nBuilds things");
        assert_eq!(map.get(&SectionKey::Header), Some("Jane Doe\njane@x.com"));
        assert_eq!(map.canonical(CanonicalSection::Summary), Some("Builds things"));
    }

    #[test]
    fn test_order_is_first_appearance() {
        let map = parse("SKILLS\nRust\nEDUCATION\nBSc\nSUMMARY\nHi");
        let labels: Vec<&str> = map.keys().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["SKILLS", "EDUCATION", "SUMMARY"]);
    }

    #[test]
    fn test_repeated_canonical_sections_concatenate() {
        let map = parse("SUMMARY\nFirst\nSKILLS\nRust\nPROFILE\nSecond");
        assert_eq!(map.canonical(CanonicalSection::Summary), Some("First\nSecond"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_whitespace_only_sections_dropped() {
        let map = parse("SUMMARY\n   \n\nSKILLS\nRust\nEDUCATION\n\t");
        assert_eq!(map.len(), 1);
        assert!(map.canonical(CanonicalSection::Summary).is_none());
        assert!(map.canonical(CanonicalSection::Education).is_none());
    }

    #[test]
    fn test_every_body_line_assigned_once() {
        let text = "Jane\n## SUMMARY\nline a\nline b\nWORK EXPERIENCE\n- did x\n- did y\n\
                    SKILLS\nRust, Go\n## Hobbies\nchess";
        let map = parse(text);
        let keys: Vec<&SectionKey> = map.keys().collect();
        let unique: std::collections::HashSet<&SectionKey> = keys.iter().copied().collect();
        assert_eq!(keys.len(), unique.len(), "duplicate keys");

        for line in text.lines().filter(|l| recognize_heading(l).is_none()) {
            let hits = map
                .iter()
                .filter(|(_, body)| body.lines().any(|b| b == line))
                .count();
            assert_eq!(hits, 1, "line {line:?} assigned {hits} times");
        }
    }

    #[test]
    fn test_crlf_input() {
        let map = parse("SUMMARY\r\nBuilt apps.\r\nSKILLS\r\nReact");
        assert_eq!(map.canonical(CanonicalSection::Summary), Some("Built apps."));
        assert_eq!(map.canonical(CanonicalSection::Skills), Some("React"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let map = parse("SKILLS\nRust\n## Volunteering\nFood bank");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"SKILLS":"Rust","VOLUNTEERING":"Food bank"}"#);
    }

    // ── analyze ─────────────────────────────────────────────────────────────

    #[test]
    fn test_two_headings_structured() {
        let doc = analyze("SUMMARY\nBuilt apps.\nSKILLS\nReact, SQL\nEDUCATION\nBSc CS");
        assert!(!doc.is_raw());
        assert_eq!(doc.sections().content_sections(), 3);
    }

    #[test]
    fn test_zero_headings_raw_header_only() {
        let text = "Just a paragraph of prose\nwith two lines.";
        let doc = analyze(text);
        assert!(doc.is_raw());
        let keys: Vec<&SectionKey> = doc.sections().keys().collect();
        assert_eq!(keys, vec![&SectionKey::Header]);
        assert_eq!(doc.raw_text(), Some(text));
    }

    #[test]
    fn test_one_heading_raw_header_only() {
        let text = "Jane Doe\nSUMMARY\nBuilds things";
        let doc = analyze(text);
        assert!(doc.is_raw());
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections().get(&SectionKey::Header), Some(text));
    }

    #[test]
    fn test_empty_text_raw_and_empty() {
        let doc = analyze("   ");
        assert!(doc.is_raw());
        assert!(doc.sections().is_empty());
        assert_eq!(doc.raw_text(), Some(""));
    }

    #[test]
    fn test_other_title_case() {
        assert_eq!(SectionKey::Other("VOLUNTEER WORK".into()).title(), "Volunteer Work");
        assert_eq!(key(CanonicalSection::Skills).title(), "Skills");
    }
}
