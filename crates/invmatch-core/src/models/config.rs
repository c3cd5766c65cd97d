//! Configuration structures for the matching pipeline.

use serde::{Deserialize, Serialize};

use crate::invoice::rules::patterns::{AMOUNT_PATTERN, DATE_PATTERN, INVOICE_NUMBER_PATTERN};

/// Main configuration for the invmatch pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvmatchConfig {
    /// Similarity engine configuration.
    pub similarity: SimilarityConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Stop-word list applied during tokenization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    /// Keep every token.
    #[default]
    None,
    /// Drop common English function words.
    English,
}

/// TF-IDF vectorizer and matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Lowercase text before tokenizing.
    pub lowercase: bool,

    /// Stop-word list to drop from the vocabulary.
    pub stop_words: StopWords,

    /// Add one to document frequencies as if an extra document contained every term.
    pub smooth_idf: bool,

    /// Replace raw term frequency with `1 + ln(tf)`.
    pub sublinear_tf: bool,

    /// A candidate must score strictly above this to be reported as a match.
    pub min_score: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            stop_words: StopWords::None,
            smooth_idf: true,
            sublinear_tf: false,
            min_score: 0.0,
        }
    }
}

/// A single labeled extraction rule as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRuleConfig {
    /// Label reported for the captured value.
    pub label: String,

    /// Regular expression; capture group 1 is the value.
    pub pattern: String,
}

impl FieldRuleConfig {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ordered extraction rules.
    pub rules: Vec<FieldRuleConfig>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                FieldRuleConfig::new("invoice_number", INVOICE_NUMBER_PATTERN),
                FieldRuleConfig::new("date", DATE_PATTERN),
                FieldRuleConfig::new("amount", AMOUNT_PATTERN),
            ],
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Retry encrypted documents with an empty user password.
    pub decrypt_empty_password: bool,

    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            max_pages: 0,
        }
    }
}

impl InvmatchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: InvmatchConfig =
            serde_json::from_str(r#"{"similarity": {"stop_words": "english"}}"#).unwrap();

        assert_eq!(config.similarity.stop_words, StopWords::English);
        assert!(config.similarity.lowercase);
        assert!(config.similarity.smooth_idf);
        assert_eq!(config.extraction.rules.len(), 3);
        assert_eq!(config.pdf.max_pages, 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvmatchConfig::default();
        config.similarity.min_score = 0.25;
        config
            .extraction
            .rules
            .push(FieldRuleConfig::new("po_number", r"PO:\s*(\S+)"));
        config.save(&path).unwrap();

        let loaded = InvmatchConfig::from_file(&path).unwrap();
        assert_eq!(loaded.similarity.min_score, 0.25);
        assert_eq!(loaded.extraction.rules, config.extraction.rules);
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = InvmatchConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
