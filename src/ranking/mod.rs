//! Ranked retrieval: vector-space (TF-IDF + cosine) and BM25.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::Document;

pub mod bm25;
pub mod similarity;
pub mod tfidf;
pub mod vsm;

pub use bm25::{Bm25Config, Bm25Index, Bm25Ranker};
pub use tfidf::{TfIdfMatrix, TfIdfVectorizer};
pub use vsm::VectorSpaceRanker;

/// A document with its relevance score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedDocument {
    /// 1-based position of the document in the request
    pub doc_id: usize,
    pub name: String,
    pub content: String,

    /// Strictly positive; only comparable within one response
    pub score: f64,
}

/// Turn per-document scores into a ranking.
///
/// Documents scoring zero or less (or NaN) are dropped. The sort is stable,
/// so equal scores keep their input order.
pub fn rank_by_score(scores: &[f64], documents: &[Document]) -> Vec<RankedDocument> {
    let mut ranked: Vec<RankedDocument> = scores
        .iter()
        .zip(documents)
        .enumerate()
        .filter(|(_, (score, _))| **score > 0.0)
        .map(|(i, (&score, doc))| RankedDocument {
            doc_id: i + 1,
            name: doc.name.clone(),
            content: doc.content.clone(),
            score,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_by_score_filters_and_sorts() {
        let docs = Document::from_contents(["a", "b", "c", "d", "e"]);
        let ranked = rank_by_score(&[0.5, 0.0, 0.9, -1.0, 0.5], &docs);

        let ids: Vec<usize> = ranked.iter().map(|r| r.doc_id).collect();
        assert_eq!(ids, vec![3, 1, 5]);
        assert_eq!(ranked[0].name, "Document 3");
    }

    #[test]
    fn test_rank_by_score_drops_nan() {
        let docs = Document::from_contents(["a", "b"]);
        let ranked = rank_by_score(&[f64::NAN, 0.1], &docs);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].doc_id, 2);
    }

    #[test]
    fn test_ranked_document_serialization() {
        let docs = Document::from_contents(["x"]);
        let ranked = rank_by_score(&[0.25], &docs);
        assert_eq!(
            serde_json::to_value(&ranked[0]).unwrap(),
            serde_json::json!({"docId": 1, "name": "Document 1", "content": "x", "score": 0.25})
        );
    }
}
