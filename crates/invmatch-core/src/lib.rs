//! Core library for invoice matching.
//!
//! This crate provides:
//! - PDF text extraction
//! - TF-IDF cosine similarity between documents
//! - Nearest-match search over a collection of historical invoices
//! - Labeled field extraction (invoice number, date, amount)

pub mod collection;
pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod similarity;

pub use collection::{InvoiceCollection, SimilarityMatch};
pub use error::{InvmatchError, Result};
pub use invoice::{FeatureExtractor, FeatureSet, FieldRule};
pub use models::config::InvmatchConfig;
pub use models::record::InvoiceRecord;
pub use pdf::{PdfExtractor, TextSource};
pub use similarity::{SimilarityScorer, TfidfScorer};
