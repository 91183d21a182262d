//! Retrieval method identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TemuError;

/// The retrieval methods the engine can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// Case-insensitive regular expression matching
    Regex,
    /// TF-IDF vectors ranked by cosine similarity
    Vsm,
    /// Okapi BM25 ranking
    Bm25,
    /// Boolean set retrieval
    Boolean,
    /// k-means over TF-IDF vectors; the query is the cluster count
    Clustering,
    /// Initial vector-space ranking for relevance feedback
    Relevance,
}

impl SearchMethod {
    /// Every method, in display order.
    pub const ALL: [SearchMethod; 6] = [
        SearchMethod::Regex,
        SearchMethod::Vsm,
        SearchMethod::Bm25,
        SearchMethod::Boolean,
        SearchMethod::Clustering,
        SearchMethod::Relevance,
    ];

    /// The wire identifier of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Regex => "regex",
            SearchMethod::Vsm => "vsm",
            SearchMethod::Bm25 => "bm25",
            SearchMethod::Boolean => "boolean",
            SearchMethod::Clustering => "clustering",
            SearchMethod::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMethod {
    type Err = TemuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| TemuError::UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for method in SearchMethod::ALL {
            assert_eq!(method.as_str().parse::<SearchMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method() {
        let err = "tfidf".parse::<SearchMethod>().unwrap_err();
        assert!(matches!(err, TemuError::UnknownMethod(ref m) if m == "tfidf"));
        assert_eq!(err.to_string(), "Unknown method: tfidf");

        // identifiers are case-sensitive
        assert!("BM25".parse::<SearchMethod>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&SearchMethod::Bm25).unwrap(),
            "\"bm25\""
        );
        let method: SearchMethod = serde_json::from_str("\"clustering\"").unwrap();
        assert_eq!(method, SearchMethod::Clustering);
    }
}
