//! PDF text extraction and page splitting using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF extractor and splitter backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    /// Per-page text from pdf-extract, empty if it could not be used.
    page_texts: Vec<String>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            page_texts: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }

    /// Run pdf-extract over the whole document, one string per page.
    ///
    /// pdf-extract panics on some malformed inputs, so panics are
    /// converted into errors.
    fn extract_with_pdf_extract(&self) -> Result<Vec<String>> {
        let data = &self.raw_data;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(PdfError::TextExtraction(e.to_string())),
            Err(_) => Err(PdfError::TextExtraction(
                "pdf-extract panicked on malformed document".to_string(),
            )),
        }
    }

    fn check_page(&self, page: u32) -> Result<()> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        Ok(())
    }
}

/// Decrypt a document protected only by the empty user password.
///
/// Returns whether the document was encrypted.
fn unlock(doc: &mut Document) -> Result<bool> {
    if !doc.is_encrypted() {
        return Ok(false);
    }

    doc.decrypt("").map_err(|_| PdfError::Encrypted)?;
    debug!("Decrypted PDF with empty password");
    Ok(true)
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if unlock(&mut doc)? {
            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);

        self.page_texts = match self.extract_with_pdf_extract() {
            Ok(pages) if pages.len() == page_count => pages,
            Ok(pages) => {
                warn!(
                    "pdf-extract returned {} pages for a {} page document, using lopdf text",
                    pages.len(),
                    page_count
                );
                Vec::new()
            }
            Err(e) => {
                warn!("{}, using lopdf text", e);
                Vec::new()
            }
        };

        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        self.check_page(page)?;

        if let Some(text) = self.page_texts.get((page - 1) as usize) {
            trace!("Page {} text from pdf-extract ({} chars)", page, text.len());
            return Ok(text.clone());
        }

        let doc = self.document()?;
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }

    fn split_page(&self, page: u32) -> Result<Vec<u8>> {
        self.check_page(page)?;
        let doc = self.document()?;

        let others: Vec<u32> = doc
            .get_pages()
            .keys()
            .copied()
            .filter(|&number| number != page)
            .collect();

        let mut single = doc.clone();
        single.delete_pages(&others);
        single.prune_objects();

        let mut data = Vec::new();
        single
            .save_to(&mut data)
            .map_err(|e| PdfError::Split {
                page,
                reason: e.to_string(),
            })?;

        trace!("Split page {} into {} bytes", page, data.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// One page per text, Courier, one line per `Tj`.
    fn document(page_texts: &[&str]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn bytes(mut doc: Document) -> Vec<u8> {
        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"not a pdf at all").unwrap_err();

        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_document_without_pages() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(&bytes(document(&[]))).unwrap_err();

        assert!(matches!(err, PdfError::NoPages));
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_unencrypted_document_is_left_alone() {
        let mut doc = document(&["INVOICE NO: IN1"]);
        assert!(!unlock(&mut doc).unwrap());
    }

    #[test]
    fn test_password_protected_document_is_rejected() {
        let mut doc = document(&["INVOICE NO: IN1"]);
        doc.trailer.set(
            "Encrypt",
            dictionary! {
                "Filter" => "Standard",
                "V" => 1,
                "R" => 2,
                "O" => Object::string_literal(vec![0x11u8; 32]),
                "U" => Object::string_literal(vec![0x22u8; 32]),
                "P" => -4,
            },
        );
        doc.trailer.set(
            "ID",
            vec![
                Object::string_literal(vec![0x33u8; 16]),
                Object::string_literal(vec![0x33u8; 16]),
            ],
        );

        assert!(doc.is_encrypted());
        assert!(matches!(unlock(&mut doc), Err(PdfError::Encrypted)));
    }

    #[test]
    fn test_lopdf_text_used_when_pdf_extract_unavailable() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&bytes(document(&["INVOICE NO: IN7", "ATTN: Omega"]))).unwrap();
        assert_eq!(extractor.page_count(), 2);

        extractor.page_texts.clear();

        assert!(extractor.extract_page_text(1).unwrap().contains("IN7"));
        assert!(extractor.extract_page_text(2).unwrap().contains("Omega"));
    }

    #[test]
    fn test_unloaded_page_is_invalid() {
        let extractor = PdfExtractor::new();

        assert!(matches!(extractor.extract_page_text(1), Err(PdfError::InvalidPage(1))));
        assert!(matches!(extractor.split_page(1), Err(PdfError::InvalidPage(1))));
    }

    #[test]
    fn test_split_page_keeps_one_page() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&bytes(document(&["one", "two", "three"]))).unwrap();

        let single = Document::load_mem(&extractor.split_page(2).unwrap()).unwrap();
        assert_eq!(single.get_pages().len(), 1);
        assert!(matches!(extractor.split_page(4), Err(PdfError::InvalidPage(4))));
    }
}
