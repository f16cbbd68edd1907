//! Template Registry: the closed set of visual templates and their layout parameters.
//!
//! Parameters are pure data. The preview renderer and the PDF canvas both read
//! the same `LayoutParameters`, so a template's visual rules are declared
//! exactly once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::layout::font_metrics::FontFamily;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Minimalist,
    Creative,
    Elegant,
    Executive,
    Professional,
    Startup,
}

impl TemplateId {
    pub const ALL: [TemplateId; 8] = [
        TemplateId::Classic,
        TemplateId::Modern,
        TemplateId::Minimalist,
        TemplateId::Creative,
        TemplateId::Elegant,
        TemplateId::Executive,
        TemplateId::Professional,
        TemplateId::Startup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "Classic",
            TemplateId::Modern => "Modern",
            TemplateId::Minimalist => "Minimalist",
            TemplateId::Creative => "Creative",
            TemplateId::Elegant => "Elegant",
            TemplateId::Executive => "Executive",
            TemplateId::Professional => "Professional",
            TemplateId::Startup => "Startup",
        }
    }

    /// Maps a user-supplied identifier onto a template.
    ///
    /// Unknown ids only affect cosmetics, so they fall back to Classic instead of failing.
    pub fn resolve(id: &str) -> TemplateId {
        match id.parse() {
            Ok(template) => template,
            Err(e) => {
                warn!("{e}; falling back to {}", TemplateId::Classic);
                TemplateId::Classic
            }
        }
    }

    pub fn layout(&self) -> &'static LayoutParameters {
        get_layout(*self)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("unknown template id '{0}'")]
    Unknown(String),
}

impl FromStr for TemplateId {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| TemplateError::Unknown(needle.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout parameters
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Typeface {
    Serif,
    Sans,
    Mono,
}

impl Typeface {
    /// The standard PDF font family the exporter embeds for this class.
    pub fn pdf_family(&self) -> FontFamily {
        match self {
            Typeface::Serif => FontFamily::Times,
            Typeface::Sans => FontFamily::Helvetica,
            Typeface::Mono => FontFamily::Courier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCase {
    AsWritten,
    Upper,
}

impl NameCase {
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameCase::AsWritten => name.to_string(),
            NameCase::Upper => name.to_uppercase(),
        }
    }
}

/// How a section title is set off from its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingDecoration {
    /// Title in accent colour with a full-width rule underneath.
    Underline,
    /// Small filled bar to the left of the title.
    AccentBar,
    /// Centered title between two thin rules.
    CenteredRule,
    /// Title in white on a filled accent band.
    FilledBand,
    /// Bold title, no decoration.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Compact,
    Regular,
    Airy,
}

impl Density {
    pub fn body_size_pt(&self) -> f32 {
        match self {
            Density::Compact => 9.5,
            Density::Regular => 10.5,
            Density::Airy => 11.0,
        }
    }

    /// Line height as a multiple of the body size.
    pub fn line_height(&self) -> f32 {
        match self {
            Density::Compact => 1.25,
            Density::Regular => 1.4,
            Density::Airy => 1.6,
        }
    }

    /// Vertical gap before each section, in points.
    pub fn section_gap_pt(&self) -> f32 {
        match self {
            Density::Compact => 8.0,
            Density::Regular => 12.0,
            Density::Airy => 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStyle {
    Plain,
    Badge,
}

/// Decoration repeated on every page, not just the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "color")]
pub enum PageDecoration {
    None,
    SideBorder(Rgb),
    TopBar(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x11, 0x18, 0x27);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const MUTED: Rgb = Rgb(0x4b, 0x55, 0x63);

    /// Components scaled to 0.0 – 1.0 for PDF colour operators.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }

    /// CSS hex notation, used by the preview document.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Blends towards white; `amount` 0.0 keeps the colour, 1.0 gives white.
    pub fn tint(&self, amount: f32) -> Rgb {
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * amount.clamp(0.0, 1.0)).round() as u8;
        Rgb(mix(self.0), mix(self.1), mix(self.2))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutParameters {
    pub id: TemplateId,
    pub description: &'static str,
    pub premium_only: bool,
    pub typeface: Typeface,
    pub name_alignment: Alignment,
    pub name_case: NameCase,
    pub name_size_pt: f32,
    pub heading_decoration: HeadingDecoration,
    pub heading_size_pt: f32,
    pub density: Density,
    pub accent: Rgb,
    /// Filled band behind the name and contact line.
    pub header_band: Option<Rgb>,
    pub page_decoration: PageDecoration,
    pub contact_style: ContactStyle,
}

impl LayoutParameters {
    /// Colour of the candidate name; white when set on a header band.
    pub fn name_color(&self) -> Rgb {
        match self.header_band {
            Some(_) => Rgb::WHITE,
            None => Rgb::BLACK,
        }
    }

    pub fn contact_color(&self) -> Rgb {
        match self.header_band {
            Some(_) => Rgb(0xe5, 0xe7, 0xeb),
            None => Rgb::MUTED,
        }
    }

    /// Colour of section titles under this template's heading decoration.
    pub fn heading_color(&self) -> Rgb {
        match self.heading_decoration {
            HeadingDecoration::FilledBand => Rgb::WHITE,
            HeadingDecoration::Plain => Rgb::BLACK,
            HeadingDecoration::Underline
            | HeadingDecoration::AccentBar
            | HeadingDecoration::CenteredRule => self.accent,
        }
    }

    /// Badge fill and text colours, or `None` for a plain contact line.
    pub fn badge_colors(&self) -> Option<(Rgb, Rgb)> {
        match (self.contact_style, self.header_band) {
            (ContactStyle::Plain, _) => None,
            (ContactStyle::Badge, Some(band)) => Some((band.tint(0.25), Rgb::WHITE)),
            (ContactStyle::Badge, None) => Some((self.accent.tint(0.85), self.accent)),
        }
    }
}

/// Pure lookup over the closed template set.
pub fn get_layout(id: TemplateId) -> &'static LayoutParameters {
    match id {
        TemplateId::Classic => &CLASSIC,
        TemplateId::Modern => &MODERN,
        TemplateId::Minimalist => &MINIMALIST,
        TemplateId::Creative => &CREATIVE,
        TemplateId::Elegant => &ELEGANT,
        TemplateId::Executive => &EXECUTIVE,
        TemplateId::Professional => &PROFESSIONAL,
        TemplateId::Startup => &STARTUP,
    }
}

/// All layouts in display order.
pub fn all_layouts() -> impl Iterator<Item = &'static LayoutParameters> {
    TemplateId::ALL.into_iter().map(get_layout)
}

// ────────────────────────────────────────────────────────────────────────────
// Template table
// ────────────────────────────────────────────────────────────────────────────

static CLASSIC: LayoutParameters = LayoutParameters {
    id: TemplateId::Classic,
    description: "Traditional serif layout, centered name, ruled headings",
    premium_only: false,
    typeface: Typeface::Serif,
    name_alignment: Alignment::Center,
    name_case: NameCase::Upper,
    name_size_pt: 22.0,
    heading_decoration: HeadingDecoration::Underline,
    heading_size_pt: 12.0,
    density: Density::Regular,
    accent: Rgb(0x1f, 0x29, 0x37),
    header_band: None,
    page_decoration: PageDecoration::None,
    contact_style: ContactStyle::Plain,
};

static MODERN: LayoutParameters = LayoutParameters {
    id: TemplateId::Modern,
    description: "Sans-serif with a coloured header band and accent bars",
    premium_only: false,
    typeface: Typeface::Sans,
    name_alignment: Alignment::Left,
    name_case: NameCase::AsWritten,
    name_size_pt: 24.0,
    heading_decoration: HeadingDecoration::AccentBar,
    heading_size_pt: 12.5,
    density: Density::Regular,
    accent: Rgb(0x25, 0x63, 0xeb),
    header_band: Some(Rgb(0x25, 0x63, 0xeb)),
    page_decoration: PageDecoration::None,
    contact_style: ContactStyle::Plain,
};

static MINIMALIST: LayoutParameters = LayoutParameters {
    id: TemplateId::Minimalist,
    description: "Quiet sans-serif, generous spacing, undecorated headings",
    premium_only: false,
    typeface: Typeface::Sans,
    name_alignment: Alignment::Left,
    name_case: NameCase::AsWritten,
    name_size_pt: 20.0,
    heading_decoration: HeadingDecoration::Plain,
    heading_size_pt: 11.0,
    density: Density::Airy,
    accent: Rgb(0x37, 0x41, 0x51),
    header_band: None,
    page_decoration: PageDecoration::None,
    contact_style: ContactStyle::Plain,
};

static CREATIVE: LayoutParameters = LayoutParameters {
    id: TemplateId::Creative,
    description: "Bold colour side border, filled section bands, contact badges",
    premium_only: false,
    typeface: Typeface::Sans,
    name_alignment: Alignment::Left,
    name_case: NameCase::AsWritten,
    name_size_pt: 26.0,
    heading_decoration: HeadingDecoration::FilledBand,
    heading_size_pt: 12.0,
    density: Density::Regular,
    accent: Rgb(0x7c, 0x3a, 0xed),
    header_band: None,
    page_decoration: PageDecoration::SideBorder(Rgb(0x7c, 0x3a, 0xed)),
    contact_style: ContactStyle::Badge,
};

static ELEGANT: LayoutParameters = LayoutParameters {
    id: TemplateId::Elegant,
    description: "Refined serif with centered rules and a gold top bar",
    premium_only: true,
    typeface: Typeface::Serif,
    name_alignment: Alignment::Center,
    name_case: NameCase::AsWritten,
    name_size_pt: 26.0,
    heading_decoration: HeadingDecoration::CenteredRule,
    heading_size_pt: 12.5,
    density: Density::Airy,
    accent: Rgb(0xb4, 0x8a, 0x2c),
    header_band: None,
    page_decoration: PageDecoration::TopBar(Rgb(0xb4, 0x8a, 0x2c)),
    contact_style: ContactStyle::Plain,
};

static EXECUTIVE: LayoutParameters = LayoutParameters {
    id: TemplateId::Executive,
    description: "Dark navy header band, uppercase name, badge contact line",
    premium_only: true,
    typeface: Typeface::Serif,
    name_alignment: Alignment::Left,
    name_case: NameCase::Upper,
    name_size_pt: 24.0,
    heading_decoration: HeadingDecoration::Underline,
    heading_size_pt: 12.5,
    density: Density::Regular,
    accent: Rgb(0x1e, 0x3a, 0x5f),
    header_band: Some(Rgb(0x0f, 0x1f, 0x3a)),
    page_decoration: PageDecoration::None,
    contact_style: ContactStyle::Badge,
};

static PROFESSIONAL: LayoutParameters = LayoutParameters {
    id: TemplateId::Professional,
    description: "Clean sans-serif, uppercase name, teal underlined headings",
    premium_only: false,
    typeface: Typeface::Sans,
    name_alignment: Alignment::Left,
    name_case: NameCase::Upper,
    name_size_pt: 22.0,
    heading_decoration: HeadingDecoration::Underline,
    heading_size_pt: 12.0,
    density: Density::Regular,
    accent: Rgb(0x0f, 0x76, 0x6e),
    header_band: None,
    page_decoration: PageDecoration::None,
    contact_style: ContactStyle::Plain,
};

static STARTUP: LayoutParameters = LayoutParameters {
    id: TemplateId::Startup,
    description: "Monospace, compact, green accent bars and side border",
    premium_only: false,
    typeface: Typeface::Mono,
    name_alignment: Alignment::Left,
    name_case: NameCase::AsWritten,
    name_size_pt: 20.0,
    heading_decoration: HeadingDecoration::AccentBar,
    heading_size_pt: 11.5,
    density: Density::Compact,
    accent: Rgb(0x05, 0x96, 0x69),
    header_band: None,
    page_decoration: PageDecoration::SideBorder(Rgb(0x05, 0x96, 0x69)),
    contact_style: ContactStyle::Badge,
};
