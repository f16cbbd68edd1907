//! Preview Renderer: builds the structured visual document a browser draws.
//!
//! The output is a tree of typed blocks, not markup. Styling comes from the
//! template's [`LayoutParameters`]; section selection and order come from
//! [`outline`], the same source the PDF exporter draws from.

use serde::Serialize;

use crate::document::cleanup::clean_for_display;
use crate::document::outline::{outline, SectionContent};
use crate::document::sections::{analyze, ParsedDocument, SectionKey};
use crate::entitlement::EntitlementContext;
use crate::layout::templates::{
    Alignment, ContactStyle, HeadingDecoration, LayoutParameters, PageDecoration, TemplateId,
    Typeface,
};
use crate::models::contact::{ContactInfo, ContactItem};

pub const RAW_FALLBACK_WARNING: &str =
    "We couldn't detect the sections of this document, so it is shown exactly as generated.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualDocument {
    pub template: TemplateId,
    pub style: DocumentStyle,
    pub header: HeaderView,
    pub mode: RenderMode,
    pub blocks: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock: Option<UnlockPrompt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Structured,
    Raw,
    Locked,
}

/// Base typography and decoration shared by every block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStyle {
    pub typeface: Typeface,
    pub body_size_pt: f32,
    pub line_height: f32,
    pub section_gap_pt: f32,
    pub accent: String,
    pub page_decoration: PageDecoration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub name: String,
    pub name_size_pt: f32,
    pub name_color: String,
    pub alignment: Alignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    pub contact_style: ContactStyle,
    pub contact_color: String,
    pub contact: Vec<ContactItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Warning {
        message: String,
    },
    /// Whole unparsed text, verbatim.
    Raw {
        text: String,
    },
    Paragraph {
        text: String,
    },
    Section {
        key: SectionKey,
        title: String,
        decoration: HeadingDecoration,
        heading_size_pt: f32,
        heading_color: String,
        content: SectionContent,
    },
    /// Stand-in for a section the viewer may not see; carries no body text.
    Obscured {
        title: String,
        line_count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnlockPrompt {
    pub template: TemplateId,
    pub message: String,
    pub action: &'static str,
}

impl UnlockPrompt {
    fn for_template(template: TemplateId) -> Self {
        Self {
            template,
            message: format!(
                "{template} is a premium template. Unlock premium to view and export this document."
            ),
            action: "/api/v1/entitlement/confirm",
        }
    }
}

fn document_style(layout: &LayoutParameters) -> DocumentStyle {
    DocumentStyle {
        typeface: layout.typeface,
        body_size_pt: layout.density.body_size_pt(),
        line_height: layout.density.line_height(),
        section_gap_pt: layout.density.section_gap_pt(),
        accent: layout.accent.hex(),
        page_decoration: layout.page_decoration,
    }
}

fn header_view(layout: &LayoutParameters, contact: &ContactInfo) -> HeaderView {
    HeaderView {
        name: layout.name_case.apply(contact.display_name()),
        name_size_pt: layout.name_size_pt,
        name_color: layout.name_color().hex(),
        alignment: layout.name_alignment,
        band: layout.header_band.map(|band| band.hex()),
        contact_style: layout.contact_style,
        contact_color: layout.contact_color().hex(),
        contact: contact.contact_items(),
    }
}

/// Renders a parsed résumé for `template`.
///
/// With `locked` set, no section body is emitted: each section becomes an
/// [`Block::Obscured`] placeholder and an unlock prompt is attached. The
/// header is always rendered.
pub fn render(
    parsed: &ParsedDocument,
    template: TemplateId,
    contact: &ContactInfo,
    locked: bool,
) -> VisualDocument {
    let layout = template.layout();
    let mut blocks = Vec::new();

    let mode = match parsed {
        ParsedDocument::Raw(_) => {
            let text = parsed.raw_text().unwrap_or_default();
            blocks.push(Block::Warning {
                message: RAW_FALLBACK_WARNING.to_string(),
            });
            if locked {
                blocks.push(Block::Obscured {
                    title: "Document".to_string(),
                    line_count: text.lines().count(),
                });
            } else {
                blocks.push(Block::Raw {
                    text: text.to_string(),
                });
            }
            RenderMode::Raw
        }
        ParsedDocument::Structured(map) => {
            for section in outline(map) {
                if locked {
                    blocks.push(Block::Obscured {
                        line_count: section.content.row_count(),
                        title: section.title,
                    });
                } else {
                    blocks.push(Block::Section {
                        key: section.key,
                        title: section.title,
                        decoration: layout.heading_decoration,
                        heading_size_pt: layout.heading_size_pt,
                        heading_color: layout.heading_color().hex(),
                        content: section.content,
                    });
                }
            }
            RenderMode::Structured
        }
    };

    VisualDocument {
        template,
        style: document_style(layout),
        header: header_view(layout, contact),
        mode: if locked { RenderMode::Locked } else { mode },
        blocks,
        unlock: locked.then(|| UnlockPrompt::for_template(template)),
    }
}

/// Parses `text` and renders it, taking the lock decision from `entitlement`.
pub fn render_text(
    text: &str,
    template: TemplateId,
    contact: &ContactInfo,
    entitlement: &EntitlementContext,
) -> VisualDocument {
    let locked = entitlement.is_locked(template.layout());
    render(&analyze(text), template, contact, locked)
}

/// Renders a cover letter: header plus paragraphs, no section detection.
pub fn render_letter(
    text: &str,
    template: TemplateId,
    contact: &ContactInfo,
    entitlement: &EntitlementContext,
) -> VisualDocument {
    let layout = template.layout();
    let locked = entitlement.is_locked(layout);
    let paragraphs = split_paragraphs(text);

    let blocks = if locked {
        vec![Block::Obscured {
            title: "Cover Letter".to_string(),
            line_count: paragraphs.len(),
        }]
    } else {
        paragraphs
            .into_iter()
            .map(|text| Block::Paragraph { text })
            .collect()
    };

    VisualDocument {
        template,
        style: document_style(layout),
        header: header_view(layout, contact),
        mode: if locked {
            RenderMode::Locked
        } else {
            RenderMode::Structured
        },
        blocks,
        unlock: locked.then(|| UnlockPrompt::for_template(template)),
    }
}

/// Blank-line separated paragraphs, each cleaned of bold markers. Line breaks
/// inside a paragraph are kept as `\n`, matching the PDF letter layout.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        current.extend(clean_for_display(line).into_iter().map(|line| line.text));
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "SUMMARY\nBuilt apps.\nSKILLS\nReact, SQL\nEDUCATION\nBSc CS";

    fn jane() -> ContactInfo {
        ContactInfo {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "+1 555".into(),
            links: None,
            project_link: None,
        }
    }

    fn section_titles(doc: &VisualDocument) -> Vec<String> {
        doc.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section { title, .. } | Block::Obscured { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scenario_fixed_order_with_skill_chips() {
        let doc = render_text(SCENARIO, TemplateId::Classic, &jane(), &EntitlementContext::PREMIUM);
        assert_eq!(doc.mode, RenderMode::Structured);
        assert_eq!(section_titles(&doc), vec!["Summary", "Education", "Skills"]);
        match &doc.blocks[2] {
            Block::Section { content, .. } => assert_eq!(
                content,
                &SectionContent::Chips { chips: vec!["React".into(), "SQL".into()] }
            ),
            other => panic!("expected skills section, got {other:?}"),
        }
        assert!(doc.unlock.is_none());
    }

    #[test]
    fn test_header_uses_template_case() {
        let doc = render_text(SCENARIO, TemplateId::Classic, &jane(), &EntitlementContext::FREE);
        assert_eq!(doc.header.name, "JANE DOE");
        assert_eq!(doc.header.alignment, Alignment::Center);
        assert_eq!(doc.header.contact.len(), 2);

        let doc = render_text(SCENARIO, TemplateId::Modern, &jane(), &EntitlementContext::FREE);
        assert_eq!(doc.header.name, "Jane Doe");
        assert_eq!(doc.header.band.as_deref(), Some("#2563eb"));
    }

    #[test]
    fn test_locked_premium_template_never_emits_section_text() {
        for template in [TemplateId::Elegant, TemplateId::Executive] {
            let doc = render_text(SCENARIO, template, &jane(), &EntitlementContext::FREE);
            assert_eq!(doc.mode, RenderMode::Locked);
            assert!(doc.unlock.is_some());
            assert_eq!(section_titles(&doc), vec!["Summary", "Education", "Skills"]);

            let json = serde_json::to_string(&doc).unwrap();
            for secret in ["Built apps", "React", "SQL", "BSc CS"] {
                assert!(!json.contains(secret), "{secret} leaked in {template}");
            }
            assert!(json.contains("Jane Doe") || json.contains("JANE DOE"));
        }
    }

    #[test]
    fn test_premium_template_unlocked_with_entitlement() {
        let doc = render_text(SCENARIO, TemplateId::Elegant, &jane(), &EntitlementContext::PREMIUM);
        assert_eq!(doc.mode, RenderMode::Structured);
        assert!(serde_json::to_string(&doc).unwrap().contains("Built apps."));
    }

    #[test]
    fn test_raw_fallback_is_warning_then_whole_text() {
        let text = "Just a paragraph of text\nwith no headings at all";
        let doc = render_text(text, TemplateId::Modern, &jane(), &EntitlementContext::FREE);
        assert_eq!(doc.mode, RenderMode::Raw);
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(doc.blocks[0], Block::Warning { .. }));
        assert_eq!(doc.blocks[1], Block::Raw { text: text.to_string() });
    }

    #[test]
    fn test_single_heading_falls_back_to_raw() {
        let text = "Jane\nSKILLS\nRust";
        let doc = render_text(text, TemplateId::Classic, &jane(), &EntitlementContext::FREE);
        assert_eq!(doc.blocks[1], Block::Raw { text: text.to_string() });
    }

    #[test]
    fn test_locked_raw_document_is_obscured() {
        let doc = render_text("secret words", TemplateId::Executive, &jane(), &EntitlementContext::FREE);
        assert!(!serde_json::to_string(&doc).unwrap().contains("secret words"));
    }

    #[test]
    fn test_missing_sections_omitted() {
        let doc = render_text(
            "EXPERIENCE\nAcme\nPROJECTS\nCompiler",
            TemplateId::Startup,
            &jane(),
            &EntitlementContext::FREE,
        );
        assert_eq!(section_titles(&doc), vec!["Experience", "Projects"]);
    }

    #[test]
    fn test_letter_paragraphs() {
        let doc = render_letter(
            "Dear team,\n\nI **love** building\nthings.\n\n\nBest,\nJane",
            TemplateId::Professional,
            &jane(),
            &EntitlementContext::FREE,
        );
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph { text: "Dear team,".into() },
                Block::Paragraph { text: "I love building\nthings.".into() },
                Block::Paragraph { text: "Best,\nJane".into() },
            ]
        );
    }

    #[test]
    fn test_letter_paragraphs_crlf_and_whitespace_lines() {
        let doc = render_letter(
            "Dear team,\r\n\r\nFirst line\r\nsecond line\r\n   \r\nBest,\r\nJane\r\n",
            TemplateId::Classic,
            &jane(),
            &EntitlementContext::FREE,
        );
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph { text: "Dear team,".into() },
                Block::Paragraph { text: "First line\nsecond line".into() },
                Block::Paragraph { text: "Best,\nJane".into() },
            ]
        );
    }

    #[test]
    fn test_serialized_block_shape() {
        let doc = render_text(SCENARIO, TemplateId::Creative, &jane(), &EntitlementContext::FREE);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["blocks"][0]["type"], "section");
        assert_eq!(value["blocks"][0]["key"], "SUMMARY");
        assert_eq!(value["blocks"][2]["content"]["kind"], "chips");
        assert_eq!(value["header"]["contact_style"], "badge");
        assert_eq!(value["style"]["page_decoration"]["kind"], "side_border");
    }
}
