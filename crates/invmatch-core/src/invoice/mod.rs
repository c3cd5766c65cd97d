//! Invoice field extraction module.

mod features;
pub mod rules;

pub use features::{
    Feature, FeatureExtractor, FeatureSet, AMOUNT_LABEL, DATE_LABEL, INVOICE_NUMBER_LABEL,
};
pub use rules::{ExtractionMatch, FieldExtractor, FieldRule};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
