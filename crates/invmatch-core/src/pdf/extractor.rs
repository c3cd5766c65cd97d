//! PDF text extraction using lopdf and pdf-extract.

use std::any::Any;
use std::fs::File;
use std::io::Read;
use std::panic;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextSource};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Reads PDF files from disk and returns their page text.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    decrypt_empty_password: bool,
    max_pages: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            decrypt_empty_password: true,
            max_pages: 0,
        }
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            decrypt_empty_password: config.decrypt_empty_password,
            max_pages: config.max_pages,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Extract the text of every page from an in-memory PDF, in page order.
    pub fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        let data = self.prepare(data)?;

        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&data))
            .map_err(|payload| PdfError::TextExtraction(panic_message(payload.as_ref())))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let pages = if self.max_pages > 0 && pages.len() > self.max_pages {
            debug!("Truncating {} pages to {}", pages.len(), self.max_pages);
            pages.into_iter().take(self.max_pages).collect()
        } else {
            pages
        };

        trace!(
            "Extracted {} pages, {} chars",
            pages.len(),
            pages.iter().map(String::len).sum::<usize>()
        );
        Ok(pages)
    }

    /// Extract text from an in-memory PDF, pages concatenated without separators.
    pub fn extract_text_from_mem(&self, data: &[u8]) -> Result<String> {
        Ok(join_pages(self.extract_pages(data)?))
    }

    /// Validate the document structure and decrypt it if needed.
    ///
    /// Returns the bytes pdf-extract should read.
    fn prepare(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let bytes = if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(bytes)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfExtractor {
    fn try_extract_text(&self, path: &Path) -> Result<String> {
        // the handle is dropped before parsing starts
        let data = {
            let mut file = File::open(path)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            buf
        };

        debug!("Read {} bytes from {}", data.len(), path.display());
        self.extract_text_from_mem(&data)
    }
}

/// Concatenate page texts in order with nothing in between.
pub fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF parser panicked".to_string()
    }
}
