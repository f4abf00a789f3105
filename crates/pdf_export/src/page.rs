//! Per-page render items and their content-stream conversion.
//!
//! The layout step produces pages of positioned items in top-left
//! coordinates; this module converts them to PDF content streams
//! (bottom-left origin).

use crate::content::ContentStream;
use crate::fonts::Font;

/// A color in RGB format (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbColor {
    /// Black text
    pub const BLACK: RgbColor = RgbColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

/// A positioned run of text
#[derive(Debug, Clone)]
pub struct TextItem {
    /// The text to render
    pub text: String,
    /// X position in points, from the left edge
    pub x: f64,
    /// Baseline Y position in points, from the top of the page
    pub y: f64,
    /// Font face
    pub font: Font,
    /// Font size in points
    pub size: f64,
    /// Fill color
    pub color: RgbColor,
}

/// A horizontal rule
#[derive(Debug, Clone, Copy)]
pub struct LineItem {
    /// Start X position
    pub x1: f64,
    /// End X position
    pub x2: f64,
    /// Y position in points, from the top of the page
    pub y: f64,
    /// Stroke color
    pub color: RgbColor,
    /// Stroke width
    pub width: f64,
}

/// One renderable item on a page
#[derive(Debug, Clone)]
pub enum RenderItem {
    Text(TextItem),
    Line(LineItem),
}

/// A laid-out page
#[derive(Debug, Clone)]
pub struct Page {
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Items in emission order
    pub items: Vec<RenderItem>,
}

impl Page {
    /// Create an empty page with the given dimensions
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    /// Add a render item
    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    /// The text items on this page, in emission order
    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Text(t) => Some(t),
            RenderItem::Line(_) => None,
        })
    }

    /// The line items on this page, in emission order
    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Line(l) => Some(l),
            RenderItem::Text(_) => None,
        })
    }

    /// Convert this page to a content stream.
    ///
    /// Lines are painted first so text never sits under a rule, then
    /// one text object covers all runs, switching font and color only
    /// when they change.
    pub fn to_content_stream(&self) -> ContentStream {
        let mut content = ContentStream::new();

        for line in self.lines() {
            let y = self.height - line.y;
            content
                .set_stroke_rgb(line.color.r, line.color.g, line.color.b)
                .set_line_width(line.width)
                .move_to(line.x1, y)
                .line_to(line.x2, y)
                .stroke();
        }

        let mut texts = self.texts().peekable();
        if texts.peek().is_some() {
            content.begin_text();

            let mut current_font: Option<(Font, f64)> = None;
            let mut current_color: Option<RgbColor> = None;

            for text in texts {
                if current_font != Some((text.font, text.size)) {
                    content.set_font(text.font.resource_name(), text.size);
                    current_font = Some((text.font, text.size));
                }
                if current_color != Some(text.color) {
                    content.set_fill_rgb(text.color.r, text.color.g, text.color.b);
                    current_color = Some(text.color);
                }

                let y = self.height - text.y;
                content.set_text_position(text.x, y).show_text(&text.text);
            }

            content.end_text();
        }

        content
    }
}
