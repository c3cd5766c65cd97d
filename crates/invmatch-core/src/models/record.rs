//! Invoice document records.

use serde::{Deserialize, Serialize};

/// A document held in an [`InvoiceCollection`](crate::InvoiceCollection).
///
/// The identifier (usually the source path) is what self-exclusion compares;
/// the text may be empty when the source could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    text: String,
    identifier: String,
}

impl InvoiceRecord {
    pub fn new(text: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            identifier: identifier.into(),
        }
    }

    /// Extracted plain text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Equality key used to skip self-comparison.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether the source yielded no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
