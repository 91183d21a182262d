//! Okapi BM25 ranking.
//!
//! ```text
//! score(D, Q) = Σ_{q ∈ Q} IDF(q) · tf(q, D) · (k1 + 1)
//!                         / (tf(q, D) + k1 · (1 - b + b · |D| / avgdl))
//! IDF(q)      = ln(N - df(q) + 0.5) - ln(df(q) + 0.5)
//! ```
//!
//! Terms appearing in more than half of the documents get a negative IDF;
//! those are floored to `epsilon` times the average IDF of the corpus.
//! Query terms count with repetition.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::Normalizer;
use crate::document::Document;
use crate::ranking::{RankedDocument, rank_by_score};

/// Configuration for BM25 scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Config {
    /// Term frequency saturation.
    pub k1: f64,

    /// Document length normalization strength.
    pub b: f64,

    /// Fraction of the average IDF used for terms with a negative IDF.
    pub epsilon: f64,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Bm25Config {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

/// Document statistics for scoring.
#[derive(Debug, Clone, Default)]
pub struct DocumentStats {
    /// Document length (number of tokens).
    pub doc_length: usize,

    /// Term frequencies.
    pub term_frequencies: HashMap<String, usize>,
}

impl DocumentStats {
    fn from_tokens(tokens: &[String]) -> Self {
        let mut term_frequencies = HashMap::new();
        for token in tokens {
            *term_frequencies.entry(token.clone()).or_insert(0) += 1;
        }
        DocumentStats {
            doc_length: tokens.len(),
            term_frequencies,
        }
    }
}

/// BM25 statistics of one tokenized corpus.
#[derive(Debug, Clone)]
pub struct Bm25Index {
    documents: Vec<DocumentStats>,
    idf: HashMap<String, f64>,
    avg_doc_length: f64,
    config: Bm25Config,
}

impl Bm25Index {
    /// Collect statistics over already normalized documents.
    pub fn build(tokenized: &[Vec<String>], config: Bm25Config) -> Self {
        let documents: Vec<DocumentStats> = tokenized
            .iter()
            .map(|tokens| DocumentStats::from_tokens(tokens))
            .collect();

        let n = documents.len() as f64;
        let total_length: usize = documents.iter().map(|d| d.doc_length).sum();
        let avg_doc_length = if documents.is_empty() {
            0.0
        } else {
            total_length as f64 / n
        };

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in &documents {
            for term in doc.term_frequencies.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut idf: HashMap<String, f64> = document_frequency
            .iter()
            .map(|(term, &df)| {
                let df = df as f64;
                (term.to_string(), (n - df + 0.5).ln() - (df + 0.5).ln())
            })
            .collect();

        if !idf.is_empty() {
            let average_idf = idf.values().sum::<f64>() / idf.len() as f64;
            let floor = config.epsilon * average_idf;
            for value in idf.values_mut() {
                if *value < 0.0 {
                    *value = floor;
                }
            }
        }

        debug!(
            "bm25 index over {} documents, {} terms, avgdl {:.3}",
            documents.len(),
            idf.len(),
            avg_doc_length
        );

        Bm25Index {
            documents,
            idf,
            avg_doc_length,
            config,
        }
    }

    /// IDF of `term`; 0 for terms outside the corpus.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    pub fn avg_doc_length(&self) -> f64 {
        self.avg_doc_length
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether the corpus has no vocabulary to score against.
    pub fn is_degenerate(&self) -> bool {
        self.idf.is_empty() || self.avg_doc_length == 0.0
    }

    /// Score document `doc` against `query_terms`.
    pub fn score(&self, query_terms: &[String], doc: usize) -> f64 {
        let Some(stats) = self.documents.get(doc) else {
            return 0.0;
        };
        if self.is_degenerate() {
            return 0.0;
        }

        let Bm25Config { k1, b, .. } = self.config;
        let length_norm = 1.0 - b + b * stats.doc_length as f64 / self.avg_doc_length;

        query_terms
            .iter()
            .map(|term| {
                let tf = stats.term_frequencies.get(term).copied().unwrap_or(0) as f64;
                self.idf(term) * (tf * (k1 + 1.0)) / (tf + k1 * length_norm)
            })
            .sum()
    }

    /// Scores of every document, in input order.
    pub fn scores(&self, query_terms: &[String]) -> Vec<f64> {
        (0..self.documents.len())
            .map(|doc| self.score(query_terms, doc))
            .collect()
    }
}

/// Ranks documents against a query with BM25.
#[derive(Debug, Clone)]
pub struct Bm25Ranker {
    normalizer: Arc<Normalizer>,
    config: Bm25Config,
}

impl Bm25Ranker {
    pub fn new(normalizer: Arc<Normalizer>, config: Bm25Config) -> Self {
        Bm25Ranker { normalizer, config }
    }

    pub fn config(&self) -> &Bm25Config {
        &self.config
    }

    /// Rank `documents` by BM25 score for `query`.
    pub fn rank(&self, query: &str, documents: &[Document]) -> Vec<RankedDocument> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.normalizer.normalize(&doc.content))
            .collect();
        let index = Bm25Index::build(&tokenized, self.config);

        if index.is_degenerate() {
            debug!("bm25 ranking over an empty vocabulary");
            return Vec::new();
        }

        let query_terms = self.normalizer.normalize(query);
        rank_by_score(&index.scores(&query_terms), documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NormalizerConfig;

    fn tokens(docs: &[&str]) -> Vec<Vec<String>> {
        docs.iter()
            .map(|d| d.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    fn terms(query: &str) -> Vec<String> {
        query.split_whitespace().map(str::to_string).collect()
    }

    fn ranker() -> Bm25Ranker {
        Bm25Ranker::new(
            Arc::new(Normalizer::new(NormalizerConfig::default()).unwrap()),
            Bm25Config::default(),
        )
    }

    #[test]
    fn test_okapi_formula() {
        let index = Bm25Index::build(&tokens(&["cat sat", "dog ran", "bird flew"]), Bm25Config::default());

        let idf = (3.0f64 - 1.0 + 0.5).ln() - (1.0f64 + 0.5).ln();
        // tf = 1, |D| = avgdl = 2
        let expected = idf * (1.0 * 2.5) / (1.0 + 1.5);

        assert!((index.idf("cat") - idf).abs() < 1e-12);
        assert!((index.score(&terms("cat"), 0) - expected).abs() < 1e-12);
        assert_eq!(index.score(&terms("cat"), 1), 0.0);
        assert_eq!(index.avg_doc_length(), 2.0);
    }

    #[test]
    fn test_query_terms_count_with_repetition() {
        let index = Bm25Index::build(&tokens(&["cat sat", "dog ran", "bird flew"]), Bm25Config::default());
        let once = index.score(&terms("cat"), 0);
        let twice = index.score(&terms("cat cat"), 0);
        assert!((twice - 2.0 * once).abs() < 1e-12);
    }

    #[test]
    fn test_negative_idf_is_floored() {
        // "cat" is in every document and gets a negative raw IDF
        let index = Bm25Index::build(
            &tokens(&["cat a1 a2 a3", "cat b1 b2 b3", "cat c1 c2 c3"]),
            Bm25Config::default(),
        );

        let unique_idf = (2.5f64).ln() - (1.5f64).ln();
        let cat_raw = (0.5f64).ln() - (3.5f64).ln();
        let average = (9.0 * unique_idf + cat_raw) / 10.0;

        assert!((index.idf("cat") - 0.25 * average).abs() < 1e-12);
        assert!(index.idf("cat") > 0.0);
    }

    #[test]
    fn test_longer_documents_score_lower() {
        let index = Bm25Index::build(
            &tokens(&["cat x1", "cat x2 x3 x4 x5 x6", "dog", "bird", "fish"]),
            Bm25Config::default(),
        );
        assert!(index.score(&terms("cat"), 0) > index.score(&terms("cat"), 1));
    }

    #[test]
    fn test_degenerate_corpus() {
        let index = Bm25Index::build(&tokens(&["", ""]), Bm25Config::default());
        assert!(index.is_degenerate());
        assert_eq!(index.scores(&terms("cat")), vec![0.0, 0.0]);

        let index = Bm25Index::build(&[], Bm25Config::default());
        assert!(index.is_empty());
        assert!(index.is_degenerate());
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let docs = Document::from_contents([
            "the cat sat",
            "the dog ran",
            "cats and dogs",
            "cat cat",
            "bird flew",
        ]);
        let ranked = ranker().rank("cat", &docs);

        let ids: Vec<usize> = ranked.iter().map(|r| r.doc_id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_single_document_corpus_ranks_nothing() {
        let docs = Document::from_contents(["kucing makan ikan"]);
        assert!(ranker().rank("kucing", &docs).is_empty());
    }

    #[test]
    fn test_stopword_corpus_ranks_nothing() {
        let docs = Document::from_contents(["the and", "yang dan"]);
        assert!(ranker().rank("the", &docs).is_empty());
    }
}
