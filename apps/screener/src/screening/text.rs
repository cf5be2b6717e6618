//! Text Extractor: flattens a page-segmented document into one string.

use thiserror::Error;
use tracing::debug;

/// The source document could not be opened or decoded.
#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("could not parse PDF: {0}")]
    Parse(String),

    #[error("PDF extraction aborted: {0}")]
    Aborted(String),
}

/// A document whose text is addressed page by page.
pub trait PagedDocument {
    fn page_count(&self) -> usize;

    /// `None` when the page has no extractable text.
    fn page_text(&self, index: usize) -> Option<&str>;
}

/// A PDF decoded eagerly from memory.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentReadError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| DocumentReadError::Parse(e.to_string()))?;
        debug!(pages = pages.len(), "PDF decoded");
        Ok(Self { pages })
    }
}

impl PagedDocument for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Option<&str> {
        self.pages
            .get(index)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Concatenates every page's text in page order, with no separator.
pub fn extract_text<D: PagedDocument + ?Sized>(doc: &D) -> String {
    (0..doc.page_count())
        .map(|i| doc.page_text(i).unwrap_or(""))
        .collect()
}
