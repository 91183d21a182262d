//! TF-IDF vectorizer over normalized tokens.
//!
//! Weighting follows the common smoothed scheme: raw term counts times
//! `ln((1 + n) / (1 + df)) + 1`, each row scaled to unit L2 norm. The
//! vocabulary is every token that survives normalization anywhere in the
//! corpus, indexed in sorted order.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::debug;

use crate::analysis::Normalizer;
use crate::error::{Result, TemuError};
use crate::ranking::similarity::normalize_l2;

/// Dense document-term matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    /// One unit-length (or zero) row per document
    pub rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    /// Number of documents.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Vocabulary size.
    pub fn n_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column index, columns in sorted term order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    n_documents: usize,
    normalizer: Arc<Normalizer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("normalizer", &self.normalizer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer tokenizing with `normalizer`.
    pub fn new(normalizer: Arc<Normalizer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            normalizer,
        }
    }

    /// Fit the vocabulary and IDF weights on `documents`.
    ///
    /// Fails with [`TemuError::EmptyVocabulary`] when no token survives
    /// normalization.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.normalizer.normalize(doc.as_ref()))
            .collect();
        self.fit_tokens(&tokenized)
    }

    fn fit_tokens(&mut self, tokenized: &[Vec<String>]) -> Result<()> {
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(TemuError::EmptyVocabulary);
        }

        let terms: BTreeSet<&str> = document_frequency.keys().copied().collect();
        let n = tokenized.len() as f64;

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();
        self.idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency[term] as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.n_documents = tokenized.len();

        debug!(
            "fitted tf-idf on {} documents, {} terms",
            self.n_documents,
            self.vocabulary.len()
        );
        Ok(())
    }

    /// Transform a text into a unit-length TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored; a text without
    /// known terms maps to the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        self.transform_tokens(&self.normalizer.normalize(text))
    }

    fn transform_tokens(&self, tokens: &[String]) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];

        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                row[idx] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        normalize_l2(&mut row);
        row
    }

    /// Fit on `documents` and return their matrix.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<TfIdfMatrix> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.normalizer.normalize(doc.as_ref()))
            .collect();
        self.fit_tokens(&tokenized)?;

        let rows = tokenized
            .iter()
            .map(|tokens| self.transform_tokens(tokens))
            .collect();

        Ok(TfIdfMatrix { rows })
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of `term`, if it is in the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|idx| self.idf[idx])
    }
}
