//! TF-IDF vectorization over a small in-memory corpus.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::Result;
use super::tokenizer::Tokenizer;
use crate::error::SimilarityError;
use crate::models::config::SimilarityConfig;

/// Builds TF-IDF vectors for a corpus fitted from scratch on every call.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    smooth_idf: bool,
    sublinear_tf: bool,
}

/// Fitted vocabulary, IDF weights, and one L2-normalised row per document.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Term to column index, sorted by term.
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Vector of the `index`-th document in fit order.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            smooth_idf: true,
            sublinear_tf: false,
        }
    }

    pub fn from_config(config: &SimilarityConfig) -> Self {
        Self {
            tokenizer: Tokenizer::from_config(config),
            smooth_idf: config.smooth_idf,
            sublinear_tf: config.sublinear_tf,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_smooth_idf(mut self, smooth_idf: bool) -> Self {
        self.smooth_idf = smooth_idf;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Fit vocabulary and IDF on `documents` and return their vectors.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix> {
        if documents.is_empty() {
            return Err(SimilarityError::NoDocuments);
        }

        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for token in self.tokenizer.tokenize(doc) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        if df.is_empty() {
            return Err(SimilarityError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (index, (term, freq)) in df.into_iter().enumerate() {
            idf.push(self.idf_weight(n, freq as f64));
            vocabulary.insert(term, index);
        }

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row = vec![0.0; vocabulary.len()];
                for (term, &count) in tf {
                    let index = vocabulary[term];
                    row[index] = self.tf_weight(count as f64) * idf[index];
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        trace!(
            "Fitted TF-IDF on {} documents, {} terms",
            documents.len(),
            vocabulary.len()
        );

        Ok(TfidfMatrix {
            vocabulary,
            idf,
            rows,
        })
    }

    fn idf_weight(&self, n: f64, df: f64) -> f64 {
        if self.smooth_idf {
            ((1.0 + n) / (1.0 + df)).ln() + 1.0
        } else {
            (n / df).ln() + 1.0
        }
    }

    fn tf_weight(&self, count: f64) -> f64 {
        if self.sublinear_tf {
            1.0 + count.ln()
        } else {
            count
        }
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in row.iter_mut() {
            *x /= norm;
        }
    }
}
