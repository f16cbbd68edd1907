//! Page-based drawing surface over `lopdf`.
//!
//! Coordinates are top-down points from the page's top-left corner; the
//! canvas flips them into PDF user space. A vertical cursor tracks the next
//! free line. When an item would cross the bottom margin a new page starts and
//! the template's per-page decoration is drawn again.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::document::cleanup::encode_win_ansi;
use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::layout::templates::{PageDecoration, Rgb};
use crate::render::pdf::ExportError;

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN_X: f32 = 50.0;
pub const MARGIN_TOP: f32 = 48.0;
pub const MARGIN_BOTTOM: f32 = 50.0;

const SIDE_BORDER_WIDTH: f32 = 8.0;
const TOP_BAR_HEIGHT: f32 = 10.0;

/// Fraction of the font size between the top of a line box and its baseline.
const ASCENT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSlot {
    Regular,
    Bold,
}

impl FontSlot {
    fn resource_name(&self) -> &'static str {
        match self {
            FontSlot::Regular => "F1",
            FontSlot::Bold => "F2",
        }
    }
}

pub struct Canvas {
    family: FontFamily,
    decoration: PageDecoration,
    finished_pages: Vec<Vec<Operation>>,
    operations: Vec<Operation>,
    cursor: f32,
}

impl Canvas {
    pub fn new(family: FontFamily, decoration: PageDecoration) -> Self {
        let mut canvas = Self {
            family,
            decoration,
            finished_pages: Vec::new(),
            operations: Vec::new(),
            cursor: 0.0,
        };
        canvas.begin_page();
        canvas
    }

    pub fn left(&self) -> f32 {
        match self.decoration {
            PageDecoration::SideBorder(_) => MARGIN_X + SIDE_BORDER_WIDTH,
            _ => MARGIN_X,
        }
    }

    pub fn right(&self) -> f32 {
        PAGE_WIDTH - MARGIN_X
    }

    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    /// First usable y below any per-page top decoration.
    pub fn page_top(&self) -> f32 {
        match self.decoration {
            PageDecoration::TopBar(_) => TOP_BAR_HEIGHT,
            _ => 0.0,
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    pub fn page_count(&self) -> usize {
        self.finished_pages.len() + 1
    }

    /// Starts a new page unless `height` more points fit above the bottom margin.
    pub fn ensure_space(&mut self, height: f32) {
        if self.cursor + height > PAGE_HEIGHT - MARGIN_BOTTOM && !self.at_page_start() {
            self.new_page();
        }
    }

    fn at_page_start(&self) -> bool {
        self.cursor <= self.page_top() + MARGIN_TOP
    }

    pub fn new_page(&mut self) {
        let done = std::mem::take(&mut self.operations);
        self.finished_pages.push(done);
        self.begin_page();
    }

    fn begin_page(&mut self) {
        match self.decoration {
            PageDecoration::None => {}
            PageDecoration::SideBorder(color) => {
                self.fill_rect(0.0, 0.0, SIDE_BORDER_WIDTH, PAGE_HEIGHT, color)
            }
            PageDecoration::TopBar(color) => {
                self.fill_rect(0.0, 0.0, PAGE_WIDTH, TOP_BAR_HEIGHT, color)
            }
        }
        self.cursor = self.page_top() + MARGIN_TOP;
    }

    pub fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb) {
        let [r, g, b] = color.unit();
        let y = PAGE_HEIGHT - top - height;
        self.operations.extend([
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("f", vec![]),
        ]);
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, thickness: f32, color: Rgb) {
        let [r, g, b] = color.unit();
        let y = PAGE_HEIGHT - y;
        self.operations.extend([
            Operation::new("w", vec![thickness.into()]),
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
            Operation::new("m", vec![x1.into(), y.into()]),
            Operation::new("l", vec![x2.into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Draws `text` with its baseline at `baseline` (top-down).
    pub fn text(&mut self, x: f32, baseline: f32, font: FontSlot, size: f32, color: Rgb, text: &str) {
        if text.is_empty() {
            return;
        }
        let [r, g, b] = color.unit();
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), (PAGE_HEIGHT - baseline).into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Writes one line at the cursor and moves the cursor down by `line_height`.
    pub fn write_line(
        &mut self,
        x: f32,
        font: FontSlot,
        size: f32,
        line_height: f32,
        color: Rgb,
        text: &str,
    ) {
        self.ensure_space(line_height);
        let baseline = self.cursor + size * ASCENT;
        self.text(x, baseline, font, size, color, text);
        self.cursor += line_height;
    }

    /// Baseline for text of `size` vertically centered in a box starting at `top`.
    pub fn centered_baseline(top: f32, box_height: f32, size: f32) -> f32 {
        top + (box_height - size) / 2.0 + size * ASCENT
    }

    /// Serializes all pages into a PDF file.
    pub fn finish(mut self, title: &str, producer: &str) -> Result<Vec<u8>, ExportError> {
        let last = std::mem::take(&mut self.operations);
        self.finished_pages.push(last);

        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let regular_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.family.base_font(FontWeight::Regular),
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.family.base_font(FontWeight::Bold),
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! {
                FontSlot::Regular.resource_name() => regular_id,
                FontSlot::Bold.resource_name() => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.finished_pages.len());
        for operations in self.finished_pages {
            let content = Content { operations };
            let bytes = content
                .encode()
                .map_err(|e| ExportError::Pdf(e.to_string()))?;
            let content_id = document.add_object(Stream::new(Dictionary::new(), bytes));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = document.add_object(dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(title)),
            "Producer" => Object::string_literal(encode_win_ansi(producer)),
        });
        document.trailer.set("Root", catalog_id);
        document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_starts_below_top_bar() {
        let gold = Rgb(0xb4, 0x8a, 0x2c);
        let canvas = Canvas::new(FontFamily::Times, PageDecoration::TopBar(gold));
        assert_eq!(canvas.cursor(), TOP_BAR_HEIGHT + MARGIN_TOP);
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_side_border_shifts_left_margin() {
        let canvas = Canvas::new(FontFamily::Helvetica, PageDecoration::SideBorder(Rgb::BLACK));
        assert_eq!(canvas.left(), MARGIN_X + SIDE_BORDER_WIDTH);
        let plain = Canvas::new(FontFamily::Helvetica, PageDecoration::None);
        assert_eq!(plain.left(), MARGIN_X);
    }

    #[test]
    fn test_cursor_overflow_starts_new_page_with_decoration() {
        let mut canvas = Canvas::new(FontFamily::Courier, PageDecoration::SideBorder(Rgb::BLACK));
        for i in 0..200 {
            canvas.write_line(canvas.left(), FontSlot::Regular, 10.0, 14.0, Rgb::BLACK, &format!("line {i}"));
        }
        assert!(canvas.page_count() >= 3);
        // Border rectangle drawn first on the fresh page.
        assert_eq!(canvas.operations[1].operator, "re");
        assert!(canvas.cursor() <= PAGE_HEIGHT - MARGIN_BOTTOM);
    }

    #[test]
    fn test_oversized_item_on_fresh_page_does_not_loop() {
        let mut canvas = Canvas::new(FontFamily::Helvetica, PageDecoration::None);
        canvas.ensure_space(PAGE_HEIGHT * 2.0);
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_finish_produces_pdf_bytes() {
        let mut canvas = Canvas::new(FontFamily::Helvetica, PageDecoration::None);
        canvas.write_line(MARGIN_X, FontSlot::Bold, 12.0, 16.0, Rgb::BLACK, "Hello");
        let bytes = canvas.finish("Test", "CareerKit").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.windows(5).any(|w| w == b"Hello"));
    }
}
