//! Static font-metric tables for the PDF standard fonts embedded by the exporter.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe core-14 AFM files and divided by 1000. Only the three families the
//! template registry can select are covered: Helvetica, Times and Courier,
//! each in regular and bold.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32. Anything else (Latin-1 accents, WinAnsi
//! punctuation) falls back to `average_char_width`.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family / weight
// ────────────────────────────────────────────────────────────────────────────

/// The three standard PDF font families a template can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Sans-serif templates.
    Helvetica,
    /// Serif templates.
    Times,
    /// Monospace templates.
    Courier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontFamily {
    /// PostScript name of the standard font, as written into the PDF font dictionary.
    pub fn base_font(&self, weight: FontWeight) -> &'static str {
        match (self, weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold) => "Helvetica-Bold",
            (FontFamily::Times, FontWeight::Regular) => "Times-Roman",
            (FontFamily::Times, FontWeight::Bold) => "Times-Bold",
            (FontFamily::Courier, FontWeight::Regular) => "Courier",
            (FontFamily::Courier, FontWeight::Bold) => "Courier-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one family/weight pair.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub family: FontFamily,
    pub weight: FontWeight,
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of `s` in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_em`.
    ///
    /// A word wider than the line (a long URL) is broken across lines.
    /// Whitespace-only input yields no lines.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        let pieces = text
            .split_whitespace()
            .flat_map(|word| self.break_word(word, max_width_em));
        for word in pieces {
            let word_w = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + self.space_width + word_w > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Splits `word` into pieces no wider than `max_width_em`, at least one
    /// character each.
    fn break_word<'a>(&self, word: &'a str, max_width_em: f32) -> Vec<&'a str> {
        if self.measure_str(word) <= max_width_em {
            return vec![word];
        }
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut width = 0.0_f32;
        for (i, c) in word.char_indices() {
            let w = self.char_width(c);
            if i > start && width + w > max_width_em {
                pieces.push(&word[start..i]);
                start = i;
                width = 0.0;
            }
            width += w;
        }
        pieces.push(&word[start..]);
        pieces
    }

    /// Cuts `text` to fit `max_width_pt` at `size_pt`, ending in `…` when
    /// anything was dropped.
    pub fn truncate_pt(&self, text: &str, max_width_pt: f32, size_pt: f32) -> String {
        if size_pt <= 0.0 || self.width_pt(text, size_pt) <= max_width_pt {
            return text.to_string();
        }
        let budget = max_width_pt / size_pt - self.char_width('…');
        let mut out = String::new();
        let mut width = 0.0_f32;
        for c in text.chars() {
            width += self.char_width(c);
            if width > budget {
                break;
            }
            out.push(c);
        }
        let kept = out.trim_end().len();
        out.truncate(kept);
        out.push('…');
        out
    }

    /// Same as [`FontMetricTable::wrap`] with the width given in points.
    pub fn wrap_pt(&self, text: &str, max_width_pt: f32, size_pt: f32) -> Vec<String> {
        if size_pt <= 0.0 {
            return vec![];
        }
        self.wrap(text, max_width_pt / size_pt)
    }
}

/// Returns the metric table for a family/weight pair.
pub fn get_metrics(family: FontFamily, weight: FontWeight) -> &'static FontMetricTable {
    match (family, weight) {
        (FontFamily::Helvetica, FontWeight::Regular) => &HELVETICA_TABLE,
        (FontFamily::Helvetica, FontWeight::Bold) => &HELVETICA_BOLD_TABLE,
        (FontFamily::Times, FontWeight::Regular) => &TIMES_TABLE,
        (FontFamily::Times, FontWeight::Bold) => &TIMES_BOLD_TABLE,
        (FontFamily::Courier, FontWeight::Regular) => &COURIER_TABLE,
        (FontFamily::Courier, FontWeight::Bold) => &COURIER_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Helvetica,
    weight: FontWeight::Regular,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.54,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Helvetica,
    weight: FontWeight::Bold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.58,
    space_width: 0.278,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Times,
    weight: FontWeight::Regular,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0-9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.48,
    space_width: 0.250,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Times,
    weight: FontWeight::Bold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.555, 0.500, 0.500, 1.000, 0.833, 0.278, 0.333, 0.333, 0.500, 0.570, 0.250, 0.333, 0.250, 0.278,
        // 0-9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.570, 0.570, 0.570, 0.500, 0.930,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.778, 0.389, 0.500, 0.778, 0.667, 0.944,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.611, 0.778, 0.722, 0.556, 0.667, 0.722, 0.722, 1.000, 0.722, 0.722, 0.667,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.581, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.556, 0.444, 0.556, 0.444, 0.333, 0.500, 0.556, 0.278, 0.333, 0.556, 0.278, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.500, 0.556, 0.556, 0.444, 0.389, 0.333, 0.556, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.394, 0.220, 0.394, 0.520,
    ],
    average_char_width: 0.52,
    space_width: 0.250,
};

static COURIER_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Courier,
    weight: FontWeight::Regular,
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
};

static COURIER_BOLD_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Courier,
    weight: FontWeight::Bold,
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Regular);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = get_metrics(FontFamily::Courier, FontWeight::Regular);
        assert!((metrics.measure_str("iiii") - metrics.measure_str("WWWW")).abs() < 1e-6);
        assert!((metrics.measure_str("abc") - 1.8).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_not_narrower_than_regular() {
        let text = "Architected distributed caching layer";
        for family in [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier] {
            let regular = get_metrics(family, FontWeight::Regular).measure_str(text);
            let bold = get_metrics(family, FontWeight::Bold).measure_str(text);
            assert!(bold >= regular, "{family:?}: bold {bold} < regular {regular}");
        }
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Reduced onboarding time by 40% across three teams";
        let times = get_metrics(FontFamily::Times, FontWeight::Regular).measure_str(text);
        let helv = get_metrics(FontFamily::Helvetica, FontWeight::Regular).measure_str(text);
        assert!(times < helv);
    }

    #[test]
    fn test_non_ascii_uses_average_width() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Regular);
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_whitespace_only_is_empty() {
        let metrics = get_metrics(FontFamily::Times, FontWeight::Regular);
        assert!(metrics.wrap("   \n\t ", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Regular);
        assert_eq!(metrics.wrap("Built apps.", 40.0), vec!["Built apps."]);
    }

    #[test]
    fn test_wrap_respects_width_and_keeps_words() {
        let metrics = get_metrics(FontFamily::Courier, FontWeight::Regular);
        // 10 em of Courier = 16 characters per line.
        let lines = metrics.wrap("alpha beta gamma delta epsilon", 10.0);
        assert_eq!(lines, vec!["alpha beta gamma", "delta epsilon"]);
        for line in &lines {
            assert!(metrics.measure_str(line) <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let metrics = get_metrics(FontFamily::Courier, FontWeight::Regular);
        // 3.1 em of Courier = 5 characters per line.
        let lines = metrics.wrap("supercalifragilistic ok", 3.1);
        assert_eq!(lines, vec!["super", "calif", "ragil", "istic", "ok"]);
        for line in &lines {
            assert!(metrics.measure_str(line) <= 3.1);
        }
    }

    #[test]
    fn test_wrap_long_url_fits_width() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Regular);
        let url = format!("https://example.com/{}", "segment/".repeat(40));
        let lines = metrics.wrap_pt(&format!("See {url} today"), 200.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_pt(line, 10.0) <= 200.0 + 1e-3, "{line}");
        }
        assert_eq!(lines.concat().replace(' ', ""), format!("See{url}today"));
    }

    #[test]
    fn test_truncate_pt() {
        let metrics = get_metrics(FontFamily::Courier, FontWeight::Regular);
        assert_eq!(metrics.truncate_pt("Rust", 100.0, 10.0), "Rust");
        // 30pt at 10pt Courier = 5 characters, one of them the ellipsis.
        assert_eq!(metrics.truncate_pt("Kubernetes", 31.0, 10.0), "Kube…");
        assert_eq!(metrics.truncate_pt("abc defgh", 31.0, 10.0), "abc…");
        let long = "x".repeat(500);
        assert!(metrics.width_pt(&metrics.truncate_pt(&long, 120.0, 9.0), 9.0) <= 120.0);
    }

    #[test]
    fn test_wrap_pt_matches_em_conversion() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Regular);
        let text = "word ".repeat(60);
        assert_eq!(metrics.wrap_pt(&text, 400.0, 10.0), metrics.wrap(&text, 40.0));
        assert!(metrics.wrap_pt(&text, 400.0, 0.0).is_empty());
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(FontFamily::Times.base_font(FontWeight::Regular), "Times-Roman");
        assert_eq!(FontFamily::Helvetica.base_font(FontWeight::Bold), "Helvetica-Bold");
        assert_eq!(FontFamily::Courier.base_font(FontWeight::Bold), "Courier-Bold");
    }
}
