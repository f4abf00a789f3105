//! Standard-font handling.
//!
//! The profile document uses the built-in Helvetica family only, so no
//! font embedding is needed: every PDF viewer ships the standard 14
//! fonts. Width calculations use average-width approximations, which is
//! enough for centering headings.

use crate::objects::{PdfDictionary, PdfObject};

/// The fonts used by the profile document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica (body text, headings)
    Helvetica,
    /// Helvetica Bold (title caption)
    HelveticaBold,
}

/// All fonts registered in every page's resource dictionary
pub const ALL_FONTS: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

impl Font {
    /// The PDF BaseFont name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// The resource name used to select the font in content streams
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    /// Build the Type1 font dictionary for this font
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new().with_type("Font");
        dict.insert("Subtype", PdfObject::name("Type1"));
        dict.insert("BaseFont", PdfObject::name(self.pdf_name()));
        dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
        dict
    }

    /// Estimate the width of a string at the given size.
    ///
    /// Average character width approximation; adequate for centering,
    /// not for justification.
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let avg_width = match self {
            Font::Helvetica => 0.5,
            Font::HelveticaBold => 0.52,
        };
        text.chars().count() as f64 * avg_width * font_size
    }
}
