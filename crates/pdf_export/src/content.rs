//! PDF content stream generation.
//!
//! A builder for the graphics operators the profile renderer emits:
//! text objects (BT/ET, Tf, Tm, Tj), stroked lines (m, l, S, w) and
//! RGB color selection (rg/RG).

use crate::objects::fmt_real;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    /// Create a new empty content stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the content stream data
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Get a reference to the content stream data
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Set the font and size (Tf)
    pub fn set_font(&mut self, resource_name: &str, size: f64) -> &mut Self {
        self.write_fmt(format_args!("/{} {} Tf\n", resource_name, fmt_real(size)));
        self
    }

    /// Set the text matrix to a plain translation (Tm)
    pub fn set_text_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "1.0 0.0 0.0 1.0 {} {} Tm\n",
            fmt_real(x),
            fmt_real(y)
        ));
        self
    }

    /// Show a text string (Tj)
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.write_pdf_string(text);
        self.write_line(" Tj");
        self
    }

    /// Set the fill color (rg)
    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} rg\n",
            fmt_real(r),
            fmt_real(g),
            fmt_real(b)
        ));
        self
    }

    /// Set the stroke color (RG)
    pub fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} RG\n",
            fmt_real(r),
            fmt_real(g),
            fmt_real(b)
        ));
        self
    }

    /// Set the line width (w)
    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.write_fmt(format_args!("{} w\n", fmt_real(width)));
        self
    }

    /// Move to a point (m)
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} m\n", fmt_real(x), fmt_real(y)));
        self
    }

    /// Line to a point (l)
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} l\n", fmt_real(x), fmt_real(y)));
        self
    }

    /// Stroke the current path (S)
    pub fn stroke(&mut self) -> &mut Self {
        self.write_line("S");
        self
    }

    /// Write a line to the content stream
    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }

    /// Write formatted data
    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        use std::fmt::Write;
        let mut s = String::new();
        let _ = s.write_fmt(args);
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a string operand with PDF escaping
    fn write_pdf_string(&mut self, text: &str) {
        self.data.push(b'(');
        for byte in text.bytes() {
            match byte {
                b'(' | b')' | b'\\' => {
                    self.data.push(b'\\');
                    self.data.push(byte);
                }
                0x20..=0x7E => self.data.push(byte),
                _ => {
                    self.data.extend_from_slice(format!("\\{:03o}", byte).as_bytes());
                }
            }
        }
        self.data.push(b')');
    }
}
