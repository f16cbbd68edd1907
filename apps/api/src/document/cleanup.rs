//! Text cleanup for the two back ends.
//!
//! - Display: bold markers stripped, decorative bullets normalized to a flag on
//!   [`BodyLine`].
//! - PDF: every character reduced to the WinAnsi repertoire of the standard
//!   fonts. Heading lines are rewritten to their canonical label through
//!   [`recognize_heading`], so the PDF re-parse sees the same headings.

use serde::Serialize;

use crate::document::sections::{
    normalize_heading, recognize_heading, SectionKey, MAX_OTHER_HEADING_CHARS,
};

/// Glyphs generated text uses as list markers.
pub const BULLET_GLYPHS: &[char] = &[
    '•', '▸', '►', '▶', '▪', '▫', '◦', '‣', '➤', '➢', '➜', '→', '⇒', '✓', '✔', '✅', '★', '☆',
    '◆', '◇', '■', '□', '●', '○', '⚫', '»', '·', '❖', '✦', '✧', '🔹', '🔸', '👉', '⁃',
];

/// One display line of a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyLine {
    pub text: String,
    pub bullet: bool,
}

/// Removes `**` / `__` bold delimiters.
pub fn strip_bold(s: &str) -> String {
    s.replace("**", "").replace("__", "")
}

/// Splits a leading list marker off `line`. Returns `(is_bullet, rest)`.
fn split_bullet(line: &str) -> (bool, &str) {
    let trimmed = line.trim_start();
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return (true, rest.trim_start());
        }
    }
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => {
            // Drop variation selectors that trail emoji bullets.
            let rest = chars.as_str().trim_start_matches('\u{fe0f}');
            (true, rest.trim_start())
        }
        _ => (false, trimmed),
    }
}

/// Cleans a section body into display lines; blank lines are skipped.
pub fn clean_for_display(body: &str) -> Vec<BodyLine> {
    body.lines()
        .filter_map(|line| {
            let (bullet, rest) = split_bullet(line);
            let text = strip_bold(rest.trim_start_matches('#').trim());
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(BodyLine {
                    text: text.to_string(),
                    bullet,
                })
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// PDF sanitizing
// ────────────────────────────────────────────────────────────────────────────

/// WinAnsiEncoding code for `c`, if the standard fonts can draw it.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => Some(code as u8),
        _ => {
            let byte = match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8a,
                '‹' => 0x8b,
                'Œ' => 0x8c,
                'Ž' => 0x8e,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9a,
                '›' => 0x9b,
                'œ' => 0x9c,
                'ž' => 0x9e,
                'Ÿ' => 0x9f,
                _ => return None,
            };
            Some(byte)
        }
    }
}

/// Encodes text for a PDF string operand. Callers sanitize first; anything
/// left unrepresentable becomes `?`.
pub fn encode_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

/// ASCII stand-ins for common glyphs outside WinAnsi.
fn substitute(c: char) -> Option<&'static str> {
    let s = match c {
        '→' | '⇒' | '➜' | '➔' => "->",
        '←' => "<-",
        '≥' => ">=",
        '≤' => "<=",
        '≈' => "~",
        '✓' | '✔' | '✅' => "-",
        '\t' => " ",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => "-",
        '\u{2032}' => "'",
        '\u{2033}' => "\"",
        '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{202f}' => " ",
        _ => return None,
    };
    Some(s)
}

/// Reduces a single line of inline text (names, contact fields) to drawable glyphs.
pub fn sanitize_inline(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if win_ansi_byte(c).is_some() {
            out.push(c);
        } else if let Some(sub) = substitute(c) {
            out.push_str(sub);
        }
    }
    // Dropped glyphs tend to leave doubled spaces behind.
    out.split(' ')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduces document text to the PDF font repertoire, line by line.
///
/// Headings and body lines keep their classification, so the PDF re-parse
/// finds exactly the sections the preview shows:
///
/// - Canonical headings, including ones decorated with emoji, become their
///   literal uppercase label (`"✅ Skills"` → `"SKILLS"`).
/// - Free-form `#` headings become `# LABEL` with a drawable label that is
///   unique per source label. A label with nothing drawable left becomes
///   `SECTION`, numbered when it repeats.
/// - Decorative bullets become `- `. A body line that would read as a heading
///   once glyphs are dropped, or would vanish, keeps `?` for each glyph.
pub fn sanitize_for_pdf(text: &str) -> String {
    let mut labels = OtherLabels::default();
    text.lines()
        .map(|line| match recognize_heading(line) {
            Some(SectionKey::Canonical(c)) => c.label().to_string(),
            Some(SectionKey::Other(label)) => format!("# {}", labels.pdf_label(&label)),
            Some(SectionKey::Header) | None => sanitize_body_line(line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn sanitize_body_line(line: &str) -> String {
    let (bullet, rest) = split_bullet(line);
    let rest = sanitize_inline(rest);
    let out = if bullet { format!("- {rest}") } else { rest };
    let lost = out.trim().is_empty() && !line.trim().is_empty();
    if !lost && recognize_heading(&out).is_none() {
        return out;
    }

    let marked: String = line
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => ' ',
            c if win_ansi_byte(c).is_some() => c,
            _ => '?',
        })
        .collect();
    let marked = marked.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" ");
    if marked.is_empty() || recognize_heading(&marked).is_some() {
        "?".to_string()
    } else {
        marked
    }
}

/// Drawable labels handed out for free-form headings within one document.
#[derive(Default)]
struct OtherLabels {
    assigned: Vec<(String, String)>,
}

impl OtherLabels {
    fn pdf_label(&mut self, source: &str) -> String {
        if let Some((_, pdf)) = self.assigned.iter().find(|(s, _)| s == source) {
            return pdf.clone();
        }
        let base: String = normalize_heading(&sanitize_inline(source))
            .chars()
            .take(MAX_OTHER_HEADING_CHARS - 4)
            .collect();

        let numbered = |base: &str, n: usize| match n {
            1 => base.to_string(),
            n => format!("{base} {n}"),
        };
        let candidate = (1..10)
            .map(|n| numbered(&base, n))
            .chain((1..).map(|n| numbered("SECTION", n)))
            .find(|candidate| self.usable(candidate))
            .unwrap_or_default();
        self.assigned.push((source.to_string(), candidate.clone()));
        candidate
    }

    /// Re-parses to itself and collides with no other source label.
    fn usable(&self, candidate: &str) -> bool {
        recognize_heading(&format!("# {candidate}"))
            == Some(SectionKey::Other(candidate.to_string()))
            && self.assigned.iter().all(|(_, pdf)| pdf != candidate)
    }
}
