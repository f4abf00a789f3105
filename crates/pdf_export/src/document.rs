//! PDF document structure: catalog, page tree, info dictionary.

use crate::objects::{PdfDictionary, PdfObject};
use chrono::{DateTime, Utc};

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Creation date
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    /// Convert to the Info dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        if let Some(ref title) = self.title {
            dict.insert("Title", PdfObject::text(title));
        }
        if let Some(ref author) = self.author {
            dict.insert("Author", PdfObject::text(author));
        }
        if let Some(ref creator) = self.creator {
            dict.insert("Creator", PdfObject::text(creator));
        }
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::text(&pdf_date(date)));
        }
        dict
    }
}

/// Format a timestamp as a PDF date string (D:YYYYMMDDHHmmSSZ)
pub fn pdf_date(date: DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Create the catalog (root) dictionary
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Catalog");
    dict.insert("Pages", PdfObject::Reference(pages_ref));
    dict
}

/// Create the page-tree root dictionary
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Pages");
    let kids: Vec<PdfObject> = page_refs.iter().map(|&r| PdfObject::Reference(r)).collect();
    dict.insert("Kids", PdfObject::Array(kids));
    dict.insert("Count", PdfObject::Integer(page_refs.len() as i64));
    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_create_catalog() {
        let catalog = create_catalog(2);
        assert!(catalog.get("Type").is_some());
        assert!(matches!(
            catalog.get("Pages"),
            Some(PdfObject::Reference(2))
        ));
    }

    #[test]
    fn test_create_pages_counts_kids() {
        let pages = create_pages(&[3, 5, 7]);
        assert!(matches!(pages.get("Count"), Some(PdfObject::Integer(3))));
    }

    #[test]
    fn test_pdf_date_format() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
        assert_eq!(pdf_date(date), "D:20240309143005Z");
    }

    #[test]
    fn test_info_dictionary_skips_absent_fields() {
        let info = DocumentInfo {
            title: Some("Skills Profile".to_string()),
            ..Default::default()
        };
        let dict = info.to_dictionary();
        assert!(dict.get("Title").is_some());
        assert!(dict.get("Author").is_none());
    }
}
