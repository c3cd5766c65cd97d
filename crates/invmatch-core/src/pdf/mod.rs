//! PDF processing module.

mod extractor;

pub use extractor::{join_pages, PdfExtractor};

use std::path::Path;

use tracing::error;

use crate::error::PdfError;
use crate::models::record::InvoiceRecord;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Something that turns a document path into plain text.
pub trait TextSource {
    /// Read `path` and return its text, or the reason it could not be read.
    fn try_extract_text(&self, path: &Path) -> Result<String>;

    /// Like [`try_extract_text`](Self::try_extract_text), but logs failures
    /// and returns an empty string instead.
    fn extract_text(&self, path: &Path) -> String {
        match self.try_extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                String::new()
            }
        }
    }

    /// Read `path` into a record identified by the path itself.
    fn read_record(&self, path: &Path) -> InvoiceRecord {
        InvoiceRecord::new(self.extract_text(path), path.display().to_string())
    }
}
