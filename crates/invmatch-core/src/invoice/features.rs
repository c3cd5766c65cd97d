//! Labeled feature extraction over invoice text.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use super::Result;
use super::rules::{FieldExtractor, FieldRule, AMOUNT, DATE, INVOICE_NUMBER};
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;

pub const INVOICE_NUMBER_LABEL: &str = "invoice_number";
pub const DATE_LABEL: &str = "date";
pub const AMOUNT_LABEL: &str = "amount";

/// One label and the value captured for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub label: String,
    pub value: Option<String>,
}

/// Extracted values, one entry per rule, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    /// Captured value for `label`; `None` when the label is unknown or did not match.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|f| f.label == label)
            .and_then(|f| f.value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of labels that captured a value.
    pub fn found_count(&self) -> usize {
        self.features.iter().filter(|f| f.value.is_some()).count()
    }

    pub fn invoice_number(&self) -> Option<&str> {
        self.get(INVOICE_NUMBER_LABEL)
    }

    /// The `date` value as a calendar date; `None` if absent or not a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.get(DATE_LABEL)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// The `amount` value with thousands separators removed.
    pub fn amount(&self) -> Option<Decimal> {
        self.get(AMOUNT_LABEL)
            .and_then(|a| Decimal::from_str(&a.replace(',', "")).ok())
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.features.len()))?;
        for feature in &self.features {
            map.serialize_entry(&feature.label, &feature.value)?;
        }
        map.end()
    }
}

/// Applies an ordered list of [`FieldRule`]s to text.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    rules: Vec<FieldRule>,
}

impl FeatureExtractor {
    /// Extractor with the invoice number, date, and amount rules.
    pub fn new() -> Self {
        Self {
            rules: vec![
                FieldRule {
                    label: INVOICE_NUMBER_LABEL.to_string(),
                    pattern: INVOICE_NUMBER.clone(),
                },
                FieldRule {
                    label: DATE_LABEL.to_string(),
                    pattern: DATE.clone(),
                },
                FieldRule {
                    label: AMOUNT_LABEL.to_string(),
                    pattern: AMOUNT.clone(),
                },
            ],
        }
    }

    /// Build an extractor from explicit rules. Labels must be unique.
    pub fn with_rules(rules: Vec<FieldRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.label()) {
                return Err(ExtractionError::DuplicateLabel(rule.label().to_string()));
            }
        }
        Ok(Self { rules })
    }

    /// Compile the configured rules.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(|r| FieldRule::parse(r.label.as_str(), &r.pattern))
            .collect::<Result<Vec<_>>>()?;
        debug!("Compiled {} extraction rules", rules.len());
        Self::with_rules(rules)
    }

    /// Append a rule after the existing ones.
    pub fn push_rule(&mut self, rule: FieldRule) -> Result<()> {
        if self.rules.iter().any(|r| r.label() == rule.label()) {
            return Err(ExtractionError::DuplicateLabel(rule.label().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Run every rule against `text`. Never fails; unmatched labels are absent.
    pub fn extract(&self, text: &str) -> FeatureSet {
        let features = self
            .rules
            .iter()
            .map(|rule| {
                let value = rule.extract(text).map(|m| m.value);
                trace!("Rule {} -> {:?}", rule.label(), value);
                Feature {
                    label: rule.label().to_string(),
                    value,
                }
            })
            .collect();

        FeatureSet { features }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
