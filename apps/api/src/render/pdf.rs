//! PDF Exporter: draws a document onto a paginated [`Canvas`].
//!
//! The exporter works from raw text: it sanitizes the text to the embedded
//! font's repertoire, re-parses it with the section parser and draws the
//! shared [`outline`], so its sections match the preview by construction.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::document::cleanup::{sanitize_for_pdf, sanitize_inline, strip_bold, BodyLine};
use crate::document::outline::{outline, OutlineSection, SectionContent};
use crate::document::sections::{analyze, ParsedDocument};
use crate::entitlement::EntitlementContext;
use crate::layout::font_metrics::{get_metrics, FontMetricTable, FontWeight};
use crate::layout::templates::{Alignment, HeadingDecoration, LayoutParameters, Rgb, TemplateId};
use crate::models::contact::ContactInfo;
use crate::models::document::DocumentType;
use crate::render::canvas::{Canvas, FontSlot, PAGE_WIDTH};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template {template} requires premium; unlock it to export")]
    Locked { template: TemplateId },

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// A finished, downloadable export.
#[derive(Debug, Clone)]
pub struct PdfArtifact {
    pub file_name: String,
    pub bytes: Bytes,
    pub page_count: usize,
}

/// `<documentType>_<appName>_<template>.pdf`
pub fn pdf_file_name(document_type: DocumentType, app_name: &str, template: TemplateId) -> String {
    let app: String = app_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    format!("{}_{}_{}.pdf", document_type.as_str(), app, template.as_str())
}

/// Exports `text` as a PDF in `template`.
///
/// Premium templates without entitlement are refused before any drawing
/// happens. CPU-bound; async callers run it inside `spawn_blocking`.
pub fn export_pdf(
    document_type: DocumentType,
    text: &str,
    template: TemplateId,
    contact: &ContactInfo,
    entitlement: &EntitlementContext,
    app_name: &str,
) -> Result<PdfArtifact, ExportError> {
    let layout = template.layout();
    if entitlement.is_locked(layout) {
        return Err(ExportError::Locked { template });
    }

    let mut composer = Composer::new(layout);
    composer.draw_header(contact);

    match document_type {
        DocumentType::Resume => {
            let sanitized = sanitize_for_pdf(text);
            match analyze(&sanitized) {
                ParsedDocument::Structured(map) => {
                    for section in outline(&map) {
                        composer.draw_section(&section);
                    }
                }
                ParsedDocument::Raw(_) => composer.draw_paragraphs(&sanitized),
            }
        }
        DocumentType::CoverLetter => {
            let sanitized: Vec<String> = text
                .lines()
                .map(|line| sanitize_inline(&strip_bold(line)))
                .collect();
            composer.draw_paragraphs(&sanitized.join("\n"));
        }
    }

    let page_count = composer.canvas.page_count();
    let title = match contact.display_name() {
        "" => document_type.to_string(),
        name => format!("{} - {}", sanitize_inline(name), document_type),
    };
    let bytes = composer.canvas.finish(&title, app_name)?;
    debug!(pages = page_count, size = bytes.len(), "PDF composed");

    let file_name = pdf_file_name(document_type, app_name, template);
    info!(%file_name, "Exported PDF");
    Ok(PdfArtifact {
        file_name,
        bytes: Bytes::from(bytes),
        page_count,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Composer: template rules on top of the canvas
// ────────────────────────────────────────────────────────────────────────────

const HEADER_PADDING: f32 = 16.0;
const CHIP_PAD_X: f32 = 6.0;
const CHIP_PAD_Y: f32 = 3.5;
const CHIP_GAP: f32 = 6.0;
const BULLET_INDENT: f32 = 14.0;

struct Composer {
    layout: &'static LayoutParameters,
    canvas: Canvas,
    regular: &'static FontMetricTable,
    bold: &'static FontMetricTable,
}

impl Composer {
    fn new(layout: &'static LayoutParameters) -> Self {
        let family = layout.typeface.pdf_family();
        Self {
            layout,
            canvas: Canvas::new(family, layout.page_decoration),
            regular: get_metrics(family, FontWeight::Regular),
            bold: get_metrics(family, FontWeight::Bold),
        }
    }

    fn body_size(&self) -> f32 {
        self.layout.density.body_size_pt()
    }

    fn line_height(&self) -> f32 {
        self.body_size() * self.layout.density.line_height()
    }

    fn aligned_x(&self, width: f32) -> f32 {
        match self.layout.name_alignment {
            Alignment::Left => self.canvas.left(),
            Alignment::Center => self.canvas.left() + (self.canvas.content_width() - width).max(0.0) / 2.0,
        }
    }

    fn draw_header(&mut self, contact: &ContactInfo) {
        let layout = self.layout;
        let name = layout.name_case.apply(&sanitize_inline(contact.display_name()));
        let items: Vec<String> = contact
            .contact_items()
            .iter()
            .map(|item| sanitize_inline(&item.value))
            .filter(|v| !v.is_empty())
            .collect();
        let contact_size = self.body_size() - 0.5;

        if let Some(band) = layout.header_band {
            let top = self.canvas.page_top();
            let height = self.header_height(&name, &items, contact_size);
            self.canvas.fill_rect(0.0, top, PAGE_WIDTH, height, band);
            self.canvas.set_cursor(top + HEADER_PADDING);
        }

        if !name.is_empty() {
            let size = layout.name_size_pt;
            let x = self.aligned_x(self.bold.width_pt(&name, size));
            self.canvas
                .write_line(x, FontSlot::Bold, size, size * 1.3, layout.name_color(), &name);
        }

        if !items.is_empty() {
            match layout.badge_colors() {
                Some((fill, text)) => self.flow_chips(&items, contact_size, fill, text, layout.name_alignment),
                None => {
                    let joined = items.join("  |  ");
                    let lines = self
                        .regular
                        .wrap_pt(&joined, self.canvas.content_width(), contact_size);
                    for line in lines {
                        let x = self.aligned_x(self.regular.width_pt(&line, contact_size));
                        self.canvas.write_line(
                            x,
                            FontSlot::Regular,
                            contact_size,
                            contact_size * 1.5,
                            layout.contact_color(),
                            &line,
                        );
                    }
                }
            }
        }

        if layout.header_band.is_some() {
            let top = self.canvas.page_top();
            let height = self.header_height(&name, &items, contact_size);
            self.canvas.set_cursor(top + height + HEADER_PADDING);
        } else {
            self.canvas.advance(self.layout.density.section_gap_pt() / 2.0);
        }
    }

    /// Band height: padding, name line and the contact rows it will hold.
    fn header_height(&self, name: &str, items: &[String], contact_size: f32) -> f32 {
        let name_h = if name.is_empty() {
            0.0
        } else {
            self.layout.name_size_pt * 1.3
        };
        let rows = if items.is_empty() {
            0
        } else if self.layout.badge_colors().is_some() {
            self.chip_rows(items, contact_size)
        } else {
            self.regular
                .wrap_pt(&items.join("  |  "), self.canvas.content_width(), contact_size)
                .len()
        };
        let row_h = if self.layout.badge_colors().is_some() {
            contact_size + 2.0 * CHIP_PAD_Y + CHIP_GAP
        } else {
            contact_size * 1.5
        };
        HEADER_PADDING * 2.0 + name_h + rows as f32 * row_h
    }

    /// Chip label cut to fit one content row, and the chip's width.
    fn fit_chip(&self, label: &str, size: f32) -> (String, f32) {
        let label = self.regular.truncate_pt(
            label,
            self.canvas.content_width() - 2.0 * CHIP_PAD_X,
            size,
        );
        let width = self.regular.width_pt(&label, size) + 2.0 * CHIP_PAD_X;
        (label, width)
    }

    fn chip_rows(&self, labels: &[String], size: f32) -> usize {
        let mut rows = 1;
        let mut x = 0.0;
        for label in labels {
            let (_, w) = self.fit_chip(label, size);
            if x > 0.0 && x + w > self.canvas.content_width() {
                rows += 1;
                x = 0.0;
            }
            x += w + CHIP_GAP;
        }
        rows
    }

    /// Lays out filled chips left to right, wrapping to new rows.
    fn flow_chips(&mut self, labels: &[String], size: f32, fill: Rgb, text: Rgb, align: Alignment) {
        let row_h = size + 2.0 * CHIP_PAD_Y;
        let mut rows: Vec<Vec<(String, f32)>> = vec![Vec::new()];
        let mut used = 0.0;
        for label in labels {
            let (label, w) = self.fit_chip(label, size);
            let row_full = rows.last().is_some_and(|r| !r.is_empty());
            if row_full && used + w > self.canvas.content_width() {
                rows.push(Vec::new());
                used = 0.0;
            }
            if let Some(row) = rows.last_mut() {
                row.push((label, w));
            }
            used += w + CHIP_GAP;
        }

        for row in rows.into_iter().filter(|r| !r.is_empty()) {
            self.canvas.ensure_space(row_h + CHIP_GAP);
            let row_width: f32 = row.iter().map(|(_, w)| w + CHIP_GAP).sum::<f32>() - CHIP_GAP;
            let mut x = match align {
                Alignment::Left => self.canvas.left(),
                Alignment::Center => self.aligned_x(row_width),
            };
            let top = self.canvas.cursor();
            for (label, w) in row {
                self.canvas.fill_rect(x, top, w, row_h, fill);
                let baseline = Canvas::centered_baseline(top, row_h, size);
                self.canvas
                    .text(x + CHIP_PAD_X, baseline, FontSlot::Regular, size, text, &label);
                x += w + CHIP_GAP;
            }
            self.canvas.advance(row_h + CHIP_GAP);
        }
    }

    fn draw_heading(&mut self, title: &str) {
        let layout = self.layout;
        let size = layout.heading_size_pt;
        let color = layout.heading_color();
        let title = sanitize_inline(&title.to_uppercase());
        let left = self.canvas.left();
        let right = self.canvas.right();

        self.canvas.advance(layout.density.section_gap_pt());
        // Keep the heading together with the first body line.
        self.canvas.ensure_space(size * 1.6 + self.line_height());
        let top = self.canvas.cursor();

        match layout.heading_decoration {
            HeadingDecoration::Underline => {
                self.canvas
                    .write_line(left, FontSlot::Bold, size, size * 1.3, color, &title);
                let y = self.canvas.cursor();
                self.canvas.hline(left, right, y, 0.8, layout.accent);
                self.canvas.advance(size * 0.5);
            }
            HeadingDecoration::AccentBar => {
                self.canvas.fill_rect(left, top, 3.0, size * 1.1, layout.accent);
                self.canvas
                    .write_line(left + 9.0, FontSlot::Bold, size, size * 1.6, color, &title);
            }
            HeadingDecoration::CenteredRule => {
                let width = self.bold.width_pt(&title, size);
                let x = left + (self.canvas.content_width() - width).max(0.0) / 2.0;
                let mid = top + size * 0.45;
                self.canvas.hline(left, (x - 10.0).max(left), mid, 0.6, layout.accent);
                self.canvas
                    .hline((x + width + 10.0).min(right), right, mid, 0.6, layout.accent);
                self.canvas
                    .write_line(x, FontSlot::Bold, size, size * 1.6, color, &title);
            }
            HeadingDecoration::FilledBand => {
                let band_h = size + 8.0;
                self.canvas
                    .fill_rect(left, top, self.canvas.content_width(), band_h, layout.accent);
                let baseline = Canvas::centered_baseline(top, band_h, size);
                self.canvas
                    .text(left + 6.0, baseline, FontSlot::Bold, size, color, &title);
                self.canvas.advance(band_h + size * 0.5);
            }
            HeadingDecoration::Plain => {
                self.canvas
                    .write_line(left, FontSlot::Bold, size, size * 1.6, color, &title);
            }
        }
    }

    fn draw_section(&mut self, section: &OutlineSection) {
        self.draw_heading(&section.title);
        match &section.content {
            SectionContent::Lines { lines } => {
                for line in lines {
                    self.draw_body_line(line);
                }
            }
            SectionContent::Chips { chips } => {
                let fill = self.layout.accent.tint(0.85);
                let text = self.layout.accent;
                self.flow_chips(chips, self.body_size() - 0.5, fill, text, Alignment::Left);
            }
        }
    }

    fn draw_body_line(&mut self, line: &BodyLine) {
        let size = self.body_size();
        let line_h = self.line_height();
        let left = self.canvas.left();
        let (x, width) = if line.bullet {
            (left + BULLET_INDENT, self.canvas.content_width() - BULLET_INDENT)
        } else {
            (left, self.canvas.content_width())
        };

        for (i, wrapped) in self.regular.wrap_pt(&line.text, width, size).iter().enumerate() {
            if line.bullet && i == 0 {
                self.canvas.ensure_space(line_h);
                let baseline = self.canvas.cursor() + size * 0.8;
                self.canvas
                    .text(left + 4.0, baseline, FontSlot::Regular, size, self.layout.accent, "•");
            }
            self.canvas
                .write_line(x, FontSlot::Regular, size, line_h, Rgb::BLACK, wrapped);
        }
    }

    /// Body text without section styling; blank lines become paragraph gaps.
    fn draw_paragraphs(&mut self, text: &str) {
        let size = self.body_size();
        let line_h = self.line_height();
        let left = self.canvas.left();
        let width = self.canvas.content_width();
        self.canvas.advance(self.layout.density.section_gap_pt());

        for line in text.lines() {
            if line.trim().is_empty() {
                self.canvas.advance(line_h / 2.0);
                continue;
            }
            for wrapped in self.regular.wrap_pt(line, width, size) {
                self.canvas
                    .write_line(left, FontSlot::Regular, size, line_h, Rgb::BLACK, &wrapped);
            }
        }
    }
}
