//! Error types for the invmatch-core library.

use thiserror::Error;

/// Main error type for the invmatch library.
#[derive(Error, Debug)]
pub enum InvmatchError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Similarity computation error.
    #[error("similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open the file.
    #[error("failed to open file: {0}")]
    Open(#[from] std::io::Error),

    /// Failed to parse the PDF structure.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to building field extractors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A rule pattern failed to compile.
    #[error("invalid pattern for {label}: {reason}")]
    InvalidPattern { label: String, reason: String },

    /// A rule pattern has no capture group to take the value from.
    #[error("pattern for {0} has no capture group")]
    MissingCaptureGroup(String),

    /// Two rules share the same label.
    #[error("duplicate rule label: {0}")]
    DuplicateLabel(String),
}

/// Errors related to vectorization.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimilarityError {
    /// None of the documents produced a single token.
    #[error("empty vocabulary; documents contain no terms")]
    EmptyVocabulary,

    /// The corpus passed to the vectorizer was empty.
    #[error("no documents to vectorize")]
    NoDocuments,
}

/// Result type for the invmatch library.
pub type Result<T> = std::result::Result<T, InvmatchError>;
