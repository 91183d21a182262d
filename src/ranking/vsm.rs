//! Vector-space ranking: TF-IDF vectors compared by cosine similarity.

use std::sync::Arc;

use log::debug;

use crate::analysis::Normalizer;
use crate::document::Document;
use crate::ranking::similarity::cosine_similarity;
use crate::ranking::tfidf::TfIdfVectorizer;
use crate::ranking::{RankedDocument, rank_by_score};

/// Ranks documents against a query in a per-request TF-IDF space.
#[derive(Debug, Clone)]
pub struct VectorSpaceRanker {
    normalizer: Arc<Normalizer>,
}

impl VectorSpaceRanker {
    pub fn new(normalizer: Arc<Normalizer>) -> Self {
        VectorSpaceRanker { normalizer }
    }

    /// Rank `documents` by cosine similarity to `query`.
    ///
    /// A corpus whose vocabulary is empty after normalization yields an
    /// empty ranking.
    pub fn rank(&self, query: &str, documents: &[Document]) -> Vec<RankedDocument> {
        let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let mut vectorizer = TfIdfVectorizer::new(Arc::clone(&self.normalizer));

        let matrix = match vectorizer.fit_transform(&contents) {
            Ok(matrix) => matrix,
            Err(e) => {
                debug!("vector-space ranking skipped: {e}");
                return Vec::new();
            }
        };

        let query_vector = vectorizer.transform(query);
        let scores: Vec<f64> = matrix
            .rows
            .iter()
            .map(|row| cosine_similarity(&query_vector, row))
            .collect();

        rank_by_score(&scores, documents)
    }
}
