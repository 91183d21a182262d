//! Response objects, one JSON shape per method.

use serde::Serialize;

use crate::cluster::ClusterResult;
use crate::document::MatchedDocument;
use crate::error::TemuError;
use crate::query::regex::{NO_MATCHES_MESSAGE, RegexMatch, RegexOutcome};
use crate::ranking::RankedDocument;

/// The result object of one request.
///
/// Serialized without a tag, so each variant is exactly the JSON object
/// callers expect: `{matches}`, `{message}`, `{rankedDocuments[, message]}`,
/// `{matchedDocuments}`, `{clusters, numClusters, inertia}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimulationResponse {
    Matches {
        matches: Vec<RegexMatch>,
    },
    Message {
        message: String,
    },
    Ranked {
        #[serde(rename = "rankedDocuments")]
        ranked_documents: Vec<RankedDocument>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Matched {
        #[serde(rename = "matchedDocuments")]
        matched_documents: Vec<MatchedDocument>,
    },
    Clusters(ClusterResult),
    Error {
        error: String,
    },
}

impl SimulationResponse {
    pub fn ranked(ranked_documents: Vec<RankedDocument>) -> Self {
        SimulationResponse::Ranked {
            ranked_documents,
            message: None,
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        SimulationResponse::Error {
            error: message.into(),
        }
    }

    /// Whether this is an `{error}` object.
    pub fn is_error(&self) -> bool {
        matches!(self, SimulationResponse::Error { .. })
    }

    /// The error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SimulationResponse::Error { error } => Some(error.as_str()),
            _ => None,
        }
    }

    /// Number of documents carried by the response.
    pub fn document_count(&self) -> usize {
        match self {
            SimulationResponse::Matches { matches } => matches.len(),
            SimulationResponse::Ranked {
                ranked_documents, ..
            } => ranked_documents.len(),
            SimulationResponse::Matched { matched_documents } => matched_documents.len(),
            SimulationResponse::Clusters(result) => {
                result.clusters.iter().map(|(_, members)| members.len()).sum()
            }
            SimulationResponse::Message { .. } | SimulationResponse::Error { .. } => 0,
        }
    }
}

impl From<RegexOutcome> for SimulationResponse {
    fn from(outcome: RegexOutcome) -> Self {
        match outcome {
            RegexOutcome::Matches(matches) => SimulationResponse::Matches { matches },
            RegexOutcome::NoMatches => SimulationResponse::Message {
                message: NO_MATCHES_MESSAGE.to_string(),
            },
        }
    }
}

impl From<ClusterResult> for SimulationResponse {
    fn from(result: ClusterResult) -> Self {
        SimulationResponse::Clusters(result)
    }
}

impl From<&TemuError> for SimulationResponse {
    fn from(error: &TemuError) -> Self {
        SimulationResponse::error(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::Document;

    #[test]
    fn test_ranked_shape_with_and_without_message() {
        let plain = SimulationResponse::ranked(Vec::new());
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"rankedDocuments": []})
        );

        let with_message = SimulationResponse::Ranked {
            ranked_documents: Vec::new(),
            message: Some("hello".into()),
        };
        assert_eq!(
            serde_json::to_value(&with_message).unwrap(),
            json!({"rankedDocuments": [], "message": "hello"})
        );
    }

    #[test]
    fn test_matched_and_error_shapes() {
        let doc = Document::new("A", "x");
        let matched = SimulationResponse::Matched {
            matched_documents: vec![MatchedDocument::new(0, &doc)],
        };
        assert_eq!(
            serde_json::to_value(&matched).unwrap(),
            json!({"matchedDocuments": [{"docId": 1, "name": "A", "content": "x"}]})
        );

        let error = SimulationResponse::from(&TemuError::NoDocuments);
        assert!(error.is_error());
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"error": "Please provide at least one document."})
        );
    }

    #[test]
    fn test_no_matches_becomes_message() {
        let response = SimulationResponse::from(RegexOutcome::NoMatches);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"message": NO_MATCHES_MESSAGE})
        );
        assert_eq!(response.document_count(), 0);
        assert_eq!(response.error_message(), None);
    }
}
