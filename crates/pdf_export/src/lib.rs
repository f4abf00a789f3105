//! PDF Export - Renders the profile export tree as a PDF document
//!
//! This crate turns a filtered `ExportTree` into a paginated PDF,
//! streamed to any `io::Write` sink.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `content`: Content stream generation (text and line operators)
//! - `fonts`: Standard-font dictionaries and width estimation
//! - `document`: Document structure (Catalog, Pages, Info, MediaBox)
//! - `writer`: Sequential file writer (header, objects, xref, trailer)
//! - `page`: Per-page render items and their content-stream conversion
//! - `profile`: Layout of the export tree into pages
//! - `options`: Export configuration (metadata, compression)

mod content;
mod document;
mod fonts;
mod objects;
mod options;
mod page;
mod profile;
mod writer;

pub use fonts::Font;
pub use options::*;
pub use page::*;
pub use profile::*;
pub use writer::{PdfError, Result};
