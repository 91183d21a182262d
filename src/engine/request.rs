//! Request type accepted by [`Engine::simulate`](crate::engine::Engine::simulate).

use serde::{Deserialize, Serialize};

/// One retrieval request as an HTTP layer would receive it.
///
/// `documents` is the raw text blob; it is split with
/// [`parse_documents`](crate::document::parse_documents). For clustering the
/// `query` holds the cluster count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(default)]
    pub method_id: String,

    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub documents: String,
}

impl SimulationRequest {
    pub fn new<M, Q, D>(method_id: M, query: Q, documents: D) -> Self
    where
        M: Into<String>,
        Q: Into<String>,
        D: Into<String>,
    {
        SimulationRequest {
            method_id: method_id.into(),
            query: query.into(),
            documents: documents.into(),
        }
    }
}
