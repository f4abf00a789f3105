//! Profile document layout and serialization.
//!
//! Walks the filtered export tree in a single sequential pass and lays
//! it out as pages: a title block, then one block per phase with a new
//! page before every phase after the first. Every layout helper takes
//! the page and cursor explicitly; there is no ambient renderer state.

use crate::document::{create_catalog, create_pages, DocumentInfo};
use crate::fonts::{Font, ALL_FONTS};
use crate::objects::{PdfDictionary, PdfObject, PdfStream};
use crate::options::ExportOptions;
use crate::page::{LineItem, Page, RenderItem, RgbColor, TextItem};
use crate::writer::{PdfError, PdfWriter, Result};
use eval_model::{CategoryNode, ExportTree, PhaseNode};
use std::io::Write;

/// US Letter, in points
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;

/// Horizontal margins shared by all pages
const MARGIN_LEFT: f64 = 35.0;
const MARGIN_RIGHT: f64 = 35.0;
/// Top margin of the first page
const MARGIN_TOP: f64 = 40.0;
/// Top margin of continuation pages (one per phase after the first)
const MARGIN_TOP_CONTINUATION: f64 = 90.0;

/// Fixed caption of the title block
const CAPTION: &str = "Skills Profile";

const CAPTION_SIZE: f64 = 28.0;
const NAME_SIZE: f64 = 20.0;
const PHASE_SIZE: f64 = 18.0;
const CATEGORY_SIZE: f64 = 16.0;
const SKILL_SIZE: f64 = 12.0;

/// Phase headings: #15a1c5
const PHASE_COLOR: RgbColor = RgbColor {
    r: 0x15 as f64 / 255.0,
    g: 0xa1 as f64 / 255.0,
    b: 0xc5 as f64 / 255.0,
};
/// Separating rules: #cccccc
const RULE_COLOR: RgbColor = RgbColor {
    r: 0.8,
    g: 0.8,
    b: 0.8,
};
const RULE_WIDTH: f64 = 1.0;

/// Vertical cursor on the current page.
///
/// Tracks the top-based Y position and the height of the last emitted
/// line, so relative gaps ("move down half a line") have a reference.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    y: f64,
    last_line_height: f64,
}

impl Cursor {
    fn at(y: f64) -> Self {
        Self {
            y,
            last_line_height: 0.0,
        }
    }

    /// Advance by a multiple of the last line height
    fn gap(&mut self, lines: f64) {
        self.y += lines * self.last_line_height;
    }
}

fn line_height(size: f64) -> f64 {
    size * 1.15
}

/// Lay out the export tree as pages.
///
/// Pure: no I/O, deterministic for a given name and tree. An empty tree
/// produces exactly one page carrying only the title block.
pub fn layout_pages(display_name: &str, tree: &ExportTree) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::new(PAGE_WIDTH, PAGE_HEIGHT);
    let mut cursor = Cursor::at(MARGIN_TOP);

    layout_title(&mut page, &mut cursor, display_name);

    for (index, phase) in tree.phases.iter().enumerate() {
        if index > 0 {
            pages.push(page);
            page = Page::new(PAGE_WIDTH, PAGE_HEIGHT);
            cursor = Cursor::at(MARGIN_TOP_CONTINUATION);
        }
        layout_phase(&mut page, &mut cursor, phase);
    }

    pages.push(page);
    pages
}

/// Emit the title block: centered caption, centered subject name, then a
/// large gap before the first phase.
fn layout_title(page: &mut Page, cursor: &mut Cursor, display_name: &str) {
    push_centered(page, cursor, CAPTION, Font::HelveticaBold, CAPTION_SIZE);
    push_centered(page, cursor, display_name, Font::Helvetica, NAME_SIZE);
    cursor.gap(3.0);
}

/// Emit one phase block: colored heading, gap, then its categories.
fn layout_phase(page: &mut Page, cursor: &mut Cursor, phase: &PhaseNode) {
    push_text(
        page,
        cursor,
        &phase.title,
        Font::Helvetica,
        PHASE_SIZE,
        PHASE_COLOR,
    );
    cursor.gap(1.0);

    for category in &phase.categories {
        layout_category(page, cursor, category);
    }
}

/// Emit one category: title, rule, then its skills as bulleted lines
/// with a rule between consecutive skills and a larger gap after the
/// last one.
fn layout_category(page: &mut Page, cursor: &mut Cursor, category: &CategoryNode) {
    push_text(
        page,
        cursor,
        &category.title,
        Font::Helvetica,
        CATEGORY_SIZE,
        RgbColor::BLACK,
    );
    cursor.gap(0.15);
    push_rule(page, cursor);
    cursor.gap(0.35);

    let last = category.skills.len().saturating_sub(1);
    for (index, skill) in category.skills.iter().enumerate() {
        push_text(
            page,
            cursor,
            &format!("- {}", skill),
            Font::Helvetica,
            SKILL_SIZE,
            RgbColor::BLACK,
        );

        if index == last {
            cursor.gap(2.0);
        } else {
            cursor.gap(0.15);
            push_rule(page, cursor);
            cursor.gap(0.35);
        }
    }
}

/// Emit a left-aligned text line and advance the cursor past it
fn push_text(
    page: &mut Page,
    cursor: &mut Cursor,
    text: &str,
    font: Font,
    size: f64,
    color: RgbColor,
) {
    push_text_at(page, cursor, text, MARGIN_LEFT, font, size, color);
}

/// Emit a horizontally centered text line
fn push_centered(page: &mut Page, cursor: &mut Cursor, text: &str, font: Font, size: f64) {
    let x = (PAGE_WIDTH - font.text_width(text, size)) / 2.0;
    push_text_at(page, cursor, text, x.max(MARGIN_LEFT), font, size, RgbColor::BLACK);
}

fn push_text_at(
    page: &mut Page,
    cursor: &mut Cursor,
    text: &str,
    x: f64,
    font: Font,
    size: f64,
    color: RgbColor,
) {
    page.push(RenderItem::Text(TextItem {
        text: text.to_string(),
        x,
        // Baseline sits one em below the cursor's top position
        y: cursor.y + size,
        font,
        size,
        color,
    }));
    cursor.last_line_height = line_height(size);
    cursor.y += cursor.last_line_height;
}

/// Emit a separating rule at the current cursor position, spanning
/// margin to margin.
fn push_rule(page: &mut Page, cursor: &mut Cursor) {
    page.push(RenderItem::Line(LineItem {
        x1: MARGIN_LEFT,
        x2: PAGE_WIDTH - MARGIN_RIGHT,
        y: cursor.y,
        color: RULE_COLOR,
        width: RULE_WIDTH,
    }));
}

/// Render the profile document and write it to the sink.
///
/// Pages are serialized as they are converted, so output reaches the
/// sink incrementally. Fails only on sink write failure; any tree shape
/// renders (an empty one as a title-only document).
pub fn write_profile<W: Write>(
    display_name: &str,
    tree: &ExportTree,
    options: &ExportOptions,
    sink: W,
) -> Result<()> {
    let pages = layout_pages(display_name, tree);
    write_pages(&pages, options, sink)
}

/// Serialize laid-out pages as a complete PDF file.
pub fn write_pages<W: Write>(pages: &[Page], options: &ExportOptions, sink: W) -> Result<()> {
    if pages.is_empty() {
        return Err(PdfError::InvalidDocument("no pages to export".to_string()));
    }

    let mut pdf = PdfWriter::new(sink);
    pdf.set_compression(options.compress);

    pdf.write_header()?;

    let catalog_ref = pdf.allocate_object();
    let pages_ref = pdf.allocate_object();
    let info_ref = pdf.allocate_object();
    let font_refs: Vec<(Font, u32)> = ALL_FONTS
        .iter()
        .map(|&font| (font, pdf.allocate_object()))
        .collect();
    let page_refs: Vec<u32> = pages.iter().map(|_| pdf.allocate_object()).collect();
    let content_refs: Vec<u32> = pages.iter().map(|_| pdf.allocate_object()).collect();

    let info = DocumentInfo {
        title: options.title.clone(),
        author: options.author.clone(),
        creator: Some("Skill Profile Export".to_string()),
        creation_date: Some(chrono::Utc::now()),
    };
    pdf.write_object(info_ref, PdfObject::Dictionary(info.to_dictionary()))?;

    for &(font, font_ref) in &font_refs {
        pdf.write_object(font_ref, PdfObject::Dictionary(font.to_dictionary()))?;
    }

    for (i, page) in pages.iter().enumerate() {
        let content = page.to_content_stream();
        pdf.write_stream_object(content_refs[i], PdfStream::new(content.into_bytes()))?;

        let mut page_dict = PdfDictionary::new().with_type("Page");
        page_dict.insert("Parent", PdfObject::Reference(pages_ref));
        page_dict.insert(
            "MediaBox",
            PdfObject::Array(vec![
                PdfObject::Real(0.0),
                PdfObject::Real(0.0),
                PdfObject::Real(page.width),
                PdfObject::Real(page.height),
            ]),
        );
        page_dict.insert("Contents", PdfObject::Reference(content_refs[i]));

        let mut resources = PdfDictionary::new();
        let mut font_dict = PdfDictionary::new();
        for &(font, font_ref) in &font_refs {
            font_dict.insert(font.resource_name(), PdfObject::Reference(font_ref));
        }
        resources.insert("Font", PdfObject::Dictionary(font_dict));
        resources.insert(
            "ProcSet",
            PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("Text")]),
        );
        page_dict.insert("Resources", PdfObject::Dictionary(resources));

        pdf.write_object(page_refs[i], PdfObject::Dictionary(page_dict))?;
    }

    pdf.write_object(
        catalog_ref,
        PdfObject::Dictionary(create_catalog(pages_ref)),
    )?;
    pdf.write_object(pages_ref, PdfObject::Dictionary(create_pages(&page_refs)))?;

    pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
    pdf.finish()?;

    Ok(())
}
