//! Rule-based field extractors.

pub mod patterns;

use regex::Regex;

use crate::error::ExtractionError;

pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span of the value in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A labeled regex whose first capture group is the field value.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub(crate) label: String,
    pub(crate) pattern: Regex,
}

impl FieldRule {
    /// Build a rule from an already compiled regex.
    pub fn new(label: impl Into<String>, pattern: Regex) -> Result<Self, ExtractionError> {
        let label = label.into();
        // captures_len counts the implicit whole-match group
        if pattern.captures_len() < 2 {
            return Err(ExtractionError::MissingCaptureGroup(label));
        }
        Ok(Self { label, pattern })
    }

    /// Compile `pattern` and build a rule from it.
    pub fn parse(label: impl Into<String>, pattern: &str) -> Result<Self, ExtractionError> {
        let label = label.into();
        let regex = Regex::new(pattern).map_err(|e| ExtractionError::InvalidPattern {
            label: label.clone(),
            reason: e.to_string(),
        })?;
        Self::new(label, regex)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl FieldExtractor for FieldRule {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.pattern.captures(text)?;
        let value = caps.get(1)?;
        let full_match = caps.get(0)?;
        Some(
            ExtractionMatch::new(value.as_str().to_string(), full_match.as_str())
                .with_position(value.start(), value.end()),
        )
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let value = caps.get(1)?;
                let full_match = caps.get(0)?;
                Some(
                    ExtractionMatch::new(value.as_str().to_string(), full_match.as_str())
                        .with_position(value.start(), value.end()),
                )
            })
            .collect()
    }
}
