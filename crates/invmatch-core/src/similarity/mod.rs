//! Pairwise document similarity.
//!
//! Every call to [`TfidfScorer::score`] fits a fresh two-document vector
//! space, so scores from different pairs share no vocabulary or IDF weights.
//! Ranking several candidates against one query is still meaningful because
//! each comparison is made against the same query text.

mod tfidf;
mod tokenizer;

pub use tfidf::{TfidfMatrix, TfidfVectorizer};
pub use tokenizer::Tokenizer;

use tracing::debug;

use crate::error::SimilarityError;
use crate::models::config::SimilarityConfig;

/// Result type for vectorization.
pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Scores how alike two texts are, in `[0, 1]`.
pub trait SimilarityScorer {
    fn score(&self, text1: &str, text2: &str) -> f64;
}

impl<F> SimilarityScorer for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, text1: &str, text2: &str) -> f64 {
        self(text1, text2)
    }
}

/// Cosine similarity of TF-IDF vectors fitted on just the two texts.
#[derive(Debug, Clone, Default)]
pub struct TfidfScorer {
    vectorizer: TfidfVectorizer,
}

impl TfidfScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SimilarityConfig) -> Self {
        Self {
            vectorizer: TfidfVectorizer::from_config(config),
        }
    }

    pub fn with_vectorizer(vectorizer: TfidfVectorizer) -> Self {
        Self { vectorizer }
    }
}

impl SimilarityScorer for TfidfScorer {
    fn score(&self, text1: &str, text2: &str) -> f64 {
        let matrix = match self.vectorizer.fit_transform(&[text1, text2]) {
            Ok(matrix) => matrix,
            Err(e) => {
                debug!("Degenerate similarity input: {}", e);
                return 0.0;
            }
        };

        match (matrix.row(0), matrix.row(1)) {
            (Some(v1), Some(v2)) => cosine_similarity(v1, v2),
            _ => 0.0,
        }
    }
}

/// `dot(a, b) / (|a| * |b|)`, or 0 when either vector is zero. Clamped to `[0, 1]`.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::StopWords;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identical_texts_score_one() {
        let scorer = TfidfScorer::new();
        for text in ["alpha beta gamma", "Invoice Number: INV-1 Amount: $12.00", "zz"] {
            assert!((scorer.score(text, text) - 1.0).abs() < EPS, "{text}");
        }
    }

    #[test]
    fn test_symmetry() {
        let scorer = TfidfScorer::new();
        let pairs = [
            ("alpha beta gamma", "alpha beta delta"),
            ("Invoice 77 from ACME", "ACME invoice 78 total"),
            ("", "something"),
            ("one two two three", "three three four"),
        ];
        for (a, b) in pairs {
            assert_eq!(scorer.score(a, b), scorer.score(b, a));
        }
    }

    #[test]
    fn test_scores_in_unit_interval() {
        let scorer = TfidfScorer::new();
        let texts = ["alpha", "alpha alpha beta", "beta gamma", "", "delta epsilon alpha"];
        for a in texts {
            for b in texts {
                let s = scorer.score(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} -> {s}");
            }
        }
    }

    #[test]
    fn test_empty_texts_score_zero() {
        let scorer = TfidfScorer::new();
        assert_eq!(scorer.score("", ""), 0.0);
        assert_eq!(scorer.score("", "non-empty"), 0.0);
        assert_eq!(scorer.score("non-empty", ""), 0.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(TfidfScorer::new().score("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let scorer = TfidfScorer::new();
        let shared = scorer.score("alpha beta gamma", "alpha beta delta");
        let idf = (1.5f64).ln() + 1.0;
        let expected = 2.0 / (2.0 + idf * idf);

        assert!((shared - expected).abs() < EPS);
    }

    #[test]
    fn test_stop_words_only_is_degenerate() {
        let config = SimilarityConfig {
            stop_words: StopWords::English,
            ..SimilarityConfig::default()
        };
        let scorer = TfidfScorer::from_config(&config);
        assert_eq!(scorer.score("the and of", "to the"), 0.0);
    }

    #[test]
    fn test_closure_scorer() {
        let scorer = |a: &str, b: &str| if a == b { 1.0 } else { 0.5 };
        assert_eq!(scorer.score("x", "x"), 1.0);
        assert_eq!(scorer.score("x", "y"), 0.5);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < EPS);
    }
}
