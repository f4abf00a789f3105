//! Sequential PDF file writer.
//!
//! Writes the file structure (header, body objects, cross-reference
//! table, trailer) straight to the underlying sink, tracking byte
//! offsets as it goes. Nothing is buffered beyond the object currently
//! being serialized, so output streams to the consumer while later
//! pages are still being produced.

use crate::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF generation
#[derive(Debug, Error)]
pub enum PdfError {
    /// Sink write failure (including consumer disconnect)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// An object recorded for the cross-reference table
#[derive(Debug)]
struct ObjectEntry {
    obj_num: u32,
    offset: u64,
}

/// Low-level PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Current byte position
    position: u64,
    /// Objects written so far
    objects: Vec<ObjectEntry>,
    /// Next object number to allocate
    next_obj_num: u32,
    /// Whether to flate-compress streams
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    /// Create a new PDF writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    /// Set whether to compress content streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the PDF header with the binary marker
    pub fn write_header(&mut self) -> Result<()> {
        self.write_str("%PDF-1.4\n")?;
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: PdfObject) -> Result<()> {
        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&object)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")?;

        self.objects.push(ObjectEntry { obj_num, offset });
        Ok(())
    }

    /// Write a stream object with optional compression
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));

        self.write_object(obj_num, PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;

        self.objects.sort_by_key(|e| e.obj_num);
        let entries: Vec<(u32, u64)> = self.objects.iter().map(|e| (e.obj_num, e.offset)).collect();
        let size = self.next_obj_num;

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", size))?;
        // Free entry for object 0
        self.write_str("0000000000 65535 f \n")?;

        let mut expected_num = 1u32;
        for (obj_num, offset) in entries {
            // Allocated but never written object numbers become free entries
            while expected_num < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected_num += 1;
            }
            self.write_str(&format!("{:010} 00000 n \n", offset))?;
            expected_num = obj_num + 1;
        }

        self.write_str("trailer\n")?;
        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(size as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }
}

/// Flate-compress a stream's data
fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        writer.write_header().unwrap();

        assert!(buffer.starts_with(b"%PDF-1.4\n"));
    }

    #[test]
    fn test_write_object() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        let obj_num = writer.allocate_object();
        writer.write_object(obj_num, PdfObject::Integer(42)).unwrap();

        let out = String::from_utf8_lossy(&buffer);
        assert!(out.contains("1 0 obj"));
        assert!(out.contains("42"));
        assert!(out.contains("endobj"));
    }

    #[test]
    fn test_xref_and_trailer() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        writer.write_header().unwrap();
        let catalog = writer.allocate_object();
        writer
            .write_object(catalog, PdfObject::Dictionary(PdfDictionary::new()))
            .unwrap();
        writer.write_xref_and_trailer(catalog, None).unwrap();
        let buffer = writer.finish().unwrap();

        let out = String::from_utf8_lossy(buffer);
        assert!(out.contains("xref"));
        assert!(out.contains("trailer"));
        assert!(out.contains("/Root 1 0 R"));
        assert!(out.contains("startxref"));
        assert!(out.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_compressed_stream_marked() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        let obj = writer.allocate_object();
        writer
            .write_stream_object(obj, PdfStream::new(b"BT ET".repeat(20)))
            .unwrap();

        let out = String::from_utf8_lossy(&buffer);
        assert!(out.contains("/Filter /FlateDecode"));
        assert!(out.contains("/Length"));
    }

    #[test]
    fn test_uncompressed_stream_kept_raw() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        writer.set_compression(false);
        let obj = writer.allocate_object();
        writer
            .write_stream_object(obj, PdfStream::new(b"BT /F1 12.0 Tf ET".to_vec()))
            .unwrap();

        let out = String::from_utf8_lossy(&buffer);
        assert!(out.contains("BT /F1 12.0 Tf ET"));
        assert!(!out.contains("FlateDecode"));
    }
}
