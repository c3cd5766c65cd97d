//! Data models shared across the pipeline.

pub mod config;
pub mod record;

pub use config::{
    ExtractionConfig, FieldRuleConfig, InvmatchConfig, PdfConfig, SimilarityConfig, StopWords,
};
pub use record::InvoiceRecord;
