//! Insertion-ordered invoice collection with nearest-match search.

use serde::Serialize;
use tracing::{debug, trace};

use crate::models::config::SimilarityConfig;
use crate::models::record::InvoiceRecord;
use crate::similarity::{SimilarityScorer, TfidfScorer};

/// Best candidate found by [`InvoiceCollection::find_most_similar`].
///
/// `record` is `None` when nothing scored above the threshold, in which case
/// `score` is the threshold itself (0 by default).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityMatch<'a> {
    pub record: Option<&'a InvoiceRecord>,
    pub score: f64,
}

impl SimilarityMatch<'_> {
    pub fn is_match(&self) -> bool {
        self.record.is_some()
    }
}

/// Historical invoices, kept in the order they were added.
///
/// Records are never removed or modified. Identifiers are not checked for
/// uniqueness; a query skips every stored record sharing its identifier.
/// Not synchronised: share across threads behind an external lock.
#[derive(Debug, Clone)]
pub struct InvoiceCollection<S = TfidfScorer> {
    records: Vec<InvoiceRecord>,
    scorer: S,
    min_score: f64,
}

impl InvoiceCollection<TfidfScorer> {
    /// Empty collection scored with default TF-IDF cosine similarity.
    pub fn new() -> Self {
        Self::with_scorer(TfidfScorer::new())
    }

    pub fn from_config(config: &SimilarityConfig) -> Self {
        Self::with_scorer(TfidfScorer::from_config(config)).with_min_score(config.min_score)
    }
}

impl Default for InvoiceCollection<TfidfScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SimilarityScorer> InvoiceCollection<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            records: Vec::new(),
            scorer,
            min_score: 0.0,
        }
    }

    /// Candidates must score strictly above `min_score` to be returned.
    ///
    /// Negative and NaN thresholds are raised to 0, so a zero score never matches.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        // f64::max returns the non-NaN operand
        self.min_score = min_score.max(0.0);
        self
    }

    pub fn add(&mut self, record: InvoiceRecord) {
        trace!("Adding {} ({} chars)", record.identifier(), record.text().len());
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InvoiceRecord> {
        self.records.iter()
    }

    /// Highest-scoring stored record whose identifier differs from the query's.
    ///
    /// Ties go to the record added first.
    pub fn find_most_similar(&self, query: &InvoiceRecord) -> SimilarityMatch<'_> {
        let mut best = SimilarityMatch {
            record: None,
            score: self.min_score,
        };

        for record in &self.records {
            if record.identifier() == query.identifier() {
                trace!("Skipping self match {}", record.identifier());
                continue;
            }

            let score = self.scorer.score(query.text(), record.text());
            trace!("{} vs {}: {:.6}", query.identifier(), record.identifier(), score);

            if score > best.score {
                best = SimilarityMatch {
                    record: Some(record),
                    score,
                };
            }
        }

        debug!(
            "Best match for {}: {:?} ({:.6})",
            query.identifier(),
            best.record.map(InvoiceRecord::identifier),
            best.score
        );

        best
    }
}

impl<S> Extend<InvoiceRecord> for InvoiceCollection<S> {
    fn extend<I: IntoIterator<Item = InvoiceRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, id: &str) -> InvoiceRecord {
        InvoiceRecord::new(text, id)
    }

    #[test]
    fn test_empty_collection() {
        let collection = InvoiceCollection::new();
        let result = collection.find_most_similar(&record("alpha", "q"));

        assert!(result.record.is_none());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_excludes_same_identifier() {
        let mut collection = InvoiceCollection::new();
        collection.add(record("alpha beta", "a.pdf"));

        let result = collection.find_most_similar(&record("alpha beta", "a.pdf"));
        assert!(!result.is_match());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_duplicate_identifiers_all_excluded() {
        let mut collection = InvoiceCollection::new();
        collection.add(record("alpha beta", "dup.pdf"));
        collection.add(record("alpha gamma", "dup.pdf"));
        collection.add(record("alpha delta", "other.pdf"));

        let result = collection.find_most_similar(&record("alpha beta", "dup.pdf"));
        assert_eq!(result.record.map(InvoiceRecord::identifier), Some("other.pdf"));
    }

    #[test]
    fn test_first_inserted_wins_ties() {
        let mut collection = InvoiceCollection::new();
        collection.add(record("alpha beta gamma", "first"));
        collection.add(record("alpha beta gamma", "second"));
        collection.add(record("alpha beta gamma", "third"));

        let result = collection.find_most_similar(&record("alpha beta gamma", "query"));
        assert_eq!(result.record.map(InvoiceRecord::identifier), Some("first"));
        assert!((result.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_scores_never_selected() {
        let mut collection = InvoiceCollection::new();
        collection.add(record("zeta", "only"));
        collection.add(record("", "empty"));

        let result = collection.find_most_similar(&record("alpha beta", "q"));
        assert!(result.record.is_none());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let mut collection = InvoiceCollection::new();
        collection.add(record("alpha beta", "a"));

        assert!(!collection.find_most_similar(&record("", "q")).is_match());
    }

    #[test]
    fn test_nearest_match_ranking() {
        let mut collection = InvoiceCollection::new();
        collection.add(record("alpha beta gamma", "A"));
        collection.add(record("alpha beta delta", "B"));
        collection.add(record("zeta", "C"));

        let query = record("alpha beta gamma", "query");
        let scorer = TfidfScorer::new();
        let score_a = scorer.score(query.text(), "alpha beta gamma");
        let score_b = scorer.score(query.text(), "alpha beta delta");
        let score_c = scorer.score(query.text(), "zeta");

        let result = collection.find_most_similar(&query);
        assert_eq!(result.record.map(InvoiceRecord::identifier), Some("A"));
        assert_eq!(result.score, score_a);
        assert!(score_a > score_b);
        assert!(score_b > score_c);
        assert!(score_c.abs() < 1e-12);
    }

    #[test]
    fn test_later_record_wins_on_strictly_higher_score() {
        let mut collection = InvoiceCollection::new();
        collection.add(record("alpha delta", "weak"));
        collection.add(record("alpha beta gamma", "strong"));

        let result = collection.find_most_similar(&record("alpha beta gamma", "q"));
        assert_eq!(result.record.map(InvoiceRecord::identifier), Some("strong"));
    }

    #[test]
    fn test_min_score_threshold() {
        let mut collection = InvoiceCollection::new().with_min_score(0.9);
        collection.add(record("alpha beta delta", "B"));

        let result = collection.find_most_similar(&record("alpha beta gamma", "q"));
        assert!(result.record.is_none());
        assert_eq!(result.score, 0.9);
    }

    #[test]
    fn test_negative_min_score_still_rejects_zero_scores() {
        let mut collection = InvoiceCollection::new().with_min_score(-1.0);
        collection.add(record("zeta", "C"));
        collection.add(record("", "empty"));

        let result = collection.find_most_similar(&record("alpha beta", "q"));
        assert!(result.record.is_none());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_nan_min_score_falls_back_to_zero() {
        let config = SimilarityConfig {
            min_score: f64::NAN,
            ..SimilarityConfig::default()
        };
        let mut collection = InvoiceCollection::from_config(&config);
        collection.add(record("zeta", "C"));
        collection.add(record("alpha beta", "A"));

        let result = collection.find_most_similar(&record("alpha beta", "q"));
        assert_eq!(result.record.map(InvoiceRecord::identifier), Some("A"));

        let result = collection.find_most_similar(&record("omega", "q"));
        assert!(result.record.is_none());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_custom_scorer_sees_query_first() {
        let scorer = |query: &str, stored: &str| if query.starts_with(stored) { 0.7 } else { 0.1 };
        let mut collection = InvoiceCollection::with_scorer(scorer);
        collection.extend([record("abc", "1"), record("ab", "2"), record("x", "3")]);

        let result = collection.find_most_similar(&record("abc", "q"));
        assert_eq!(result.record.map(InvoiceRecord::identifier), Some("1"));
        assert_eq!(result.score, 0.7);
        assert_eq!(collection.len(), 3);
        let ids: Vec<&str> = collection.iter().map(InvoiceRecord::identifier).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
