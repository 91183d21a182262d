//! The engine: dispatches one request to one retrieval method.
//!
//! # Examples
//!
//! ```
//! use temu::engine::{Engine, SimulationRequest};
//!
//! let engine = Engine::default();
//! let request = SimulationRequest::new("boolean", "cat AND dog", "cat\n\ndog\n\ncat dog");
//! let response = engine.simulate(&request);
//!
//! assert_eq!(
//!     serde_json::to_value(&response).unwrap(),
//!     serde_json::json!({
//!         "matchedDocuments": [{"docId": 3, "name": "Document 3", "content": "cat dog"}]
//!     })
//! );
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::{Normalizer, NormalizerConfig};
use crate::cluster::{ClusterEngine, KMeansConfig};
use crate::document::{Document, parse_documents};
use crate::error::{Result, TemuError};
use crate::query::boolean::BooleanSearcher;
use crate::query::parser::MAX_QUERY_DEPTH;
use crate::query::regex::regex_search;
use crate::ranking::bm25::{Bm25Config, Bm25Ranker};
use crate::ranking::vsm::VectorSpaceRanker;

pub mod method;
pub mod request;
pub mod response;

pub use method::SearchMethod;
pub use request::SimulationRequest;
pub use response::SimulationResponse;

/// Message attached to the relevance-feedback ranking.
pub const RELEVANCE_MESSAGE: &str =
    "This is the initial ranking. In a real application you would select the relevant documents.";

/// Configuration of an [`Engine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub normalizer: NormalizerConfig,
    pub bm25: Bm25Config,
    pub kmeans: KMeansConfig,

    /// Maximum depth of a boolean query.
    pub max_query_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            normalizer: NormalizerConfig::default(),
            bm25: Bm25Config::default(),
            kmeans: KMeansConfig::default(),
            max_query_depth: MAX_QUERY_DEPTH,
        }
    }
}

/// Stateless retrieval engine; only the normalizer's stem cache is shared
/// between calls.
#[derive(Debug, Clone)]
pub struct Engine {
    normalizer: Arc<Normalizer>,
    boolean: BooleanSearcher,
    vsm: VectorSpaceRanker,
    bm25: Bm25Ranker,
    clusters: ClusterEngine,
}

impl Engine {
    /// Create an engine with its own normalizer.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let normalizer = Arc::new(Normalizer::new(config.normalizer.clone())?);
        Ok(Self::with_normalizer(normalizer, config))
    }

    /// Create an engine around an existing normalizer. The normalizer
    /// part of `config` is ignored.
    pub fn with_normalizer(normalizer: Arc<Normalizer>, config: EngineConfig) -> Self {
        Engine {
            boolean: BooleanSearcher::new(Arc::clone(&normalizer))
                .with_max_depth(config.max_query_depth),
            vsm: VectorSpaceRanker::new(Arc::clone(&normalizer)),
            bm25: Bm25Ranker::new(Arc::clone(&normalizer), config.bm25),
            clusters: ClusterEngine::new(Arc::clone(&normalizer), config.kmeans),
            normalizer,
        }
    }

    pub fn normalizer(&self) -> &Arc<Normalizer> {
        &self.normalizer
    }

    /// Run `method` over already split documents.
    pub fn run(
        &self,
        method: SearchMethod,
        query: &str,
        documents: &[Document],
    ) -> Result<SimulationResponse> {
        debug!("running {method} over {} documents", documents.len());

        let response: SimulationResponse = match method {
            SearchMethod::Regex => regex_search(query, documents)?.into(),
            SearchMethod::Vsm => SimulationResponse::ranked(self.vsm.rank(query, documents)),
            SearchMethod::Bm25 => SimulationResponse::ranked(self.bm25.rank(query, documents)),
            SearchMethod::Boolean => SimulationResponse::Matched {
                matched_documents: self.boolean.search(query, documents)?,
            },
            SearchMethod::Clustering => self.clusters.cluster(query, documents)?.into(),
            SearchMethod::Relevance => SimulationResponse::Ranked {
                ranked_documents: self.vsm.rank(query, documents),
                message: Some(RELEVANCE_MESSAGE.to_string()),
            },
        };

        Ok(response)
    }

    /// Split the raw documents of `request` and run its method.
    pub fn try_simulate(&self, request: &SimulationRequest) -> Result<SimulationResponse> {
        let documents = parse_documents(&request.documents);
        if documents.is_empty() {
            return Err(TemuError::NoDocuments);
        }

        let method: SearchMethod = request.method_id.parse()?;
        self.run(method, &request.query, &documents)
    }

    /// Like [`Engine::try_simulate`], with every failure turned into an
    /// `{error}` response.
    pub fn simulate(&self, request: &SimulationRequest) -> SimulationResponse {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_simulate(request)))
            .unwrap_or_else(|payload| Err(TemuError::internal(panic_message(&*payload))));

        match outcome {
            Ok(response) => response,
            Err(e) if e.is_input_error() => {
                warn!("rejected {} request: {e}", request.method_id);
                SimulationResponse::from(&e)
            }
            Err(e) => {
                warn!("{} request failed: {e}", request.method_id);
                let e = match e {
                    TemuError::Internal(_) => e,
                    other => TemuError::internal(other.to_string()),
                };
                SimulationResponse::from(&e)
            }
        }
    }
}

impl Default for Engine {
    /// An engine on the process-wide normalizer.
    fn default() -> Self {
        Self::with_normalizer(Normalizer::shared(), EngineConfig::default())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        let config = EngineConfig {
            kmeans: KMeansConfig {
                seed: Some(3),
                ..KMeansConfig::default()
            },
            ..EngineConfig::default()
        };
        Engine::new(config).unwrap()
    }

    #[test]
    fn test_dispatches_every_method() {
        let engine = engine();
        let documents = Document::from_contents(["the cat sat", "the dog ran", "cats and dogs"]);

        for method in SearchMethod::ALL {
            let query = if method == SearchMethod::Clustering { "2" } else { "cat" };
            let response = engine.run(method, query, &documents).unwrap();
            assert!(!response.is_error(), "{method} failed: {response:?}");
        }
    }

    #[test]
    fn test_relevance_is_vsm_plus_message() {
        let engine = engine();
        let documents = Document::from_contents(["the cat sat", "the dog ran"]);

        let vsm = engine.run(SearchMethod::Vsm, "cat", &documents).unwrap();
        let relevance = engine.run(SearchMethod::Relevance, "cat", &documents).unwrap();

        let (
            SimulationResponse::Ranked {
                ranked_documents: a,
                message: None,
            },
            SimulationResponse::Ranked {
                ranked_documents: b,
                message: Some(message),
            },
        ) = (vsm, relevance)
        else {
            panic!("expected ranked responses");
        };
        assert_eq!(a, b);
        assert_eq!(message, RELEVANCE_MESSAGE);
    }

    #[test]
    fn test_simulate_reports_errors() {
        let engine = engine();

        let response = engine.simulate(&SimulationRequest::new("vsm", "cat", "  \n\n "));
        assert_eq!(
            response.error_message(),
            Some("Please provide at least one document.")
        );

        let response = engine.simulate(&SimulationRequest::new("magic", "cat", "cat"));
        assert_eq!(response.error_message(), Some("Unknown method: magic"));

        let response = engine.simulate(&SimulationRequest::new("regex", "(", "cat"));
        assert!(
            response
                .error_message()
                .unwrap()
                .starts_with("Invalid regular expression")
        );

        let response = engine.simulate(&SimulationRequest::new("clustering", "5", "a1\n\nb1"));
        assert!(response.is_error());
    }

    #[test]
    fn test_document_check_precedes_method_check() {
        let response = engine().simulate(&SimulationRequest::new("magic", "cat", ""));
        assert_eq!(
            response.error_message(),
            Some("Please provide at least one document.")
        );
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&7u8), "unknown panic");
    }
}
