//! # Temu
//!
//! A small information retrieval playground: one request, one method, one
//! answer object.
//!
//! ## Methods
//!
//! - Regex matching with character highlight spans
//! - Boolean retrieval (`AND`, `OR`, `NOT`, parentheses)
//! - Vector space ranking (TF-IDF and cosine similarity)
//! - Okapi BM25 ranking
//! - k-means clustering over TF-IDF vectors
//! - A relevance-feedback starting ranking
//!
//! All term-based methods share one normalizer: tokenization, stop word
//! removal and Indonesian stemming behind an LRU stem cache.
//!
//! ```
//! use temu::prelude::*;
//!
//! let engine = Engine::default();
//! let response = engine.simulate(&SimulationRequest::new(
//!     "regex",
//!     "cat",
//!     "the cat sat\n\nthe dog ran",
//! ));
//! assert_eq!(response.document_count(), 1);
//! ```

pub mod analysis;
pub mod cli;
pub mod cluster;
pub mod document;
pub mod engine;
pub mod error;
pub mod query;
pub mod ranking;

pub mod prelude {
    pub use crate::analysis::{Normalizer, NormalizerConfig};
    pub use crate::document::{Document, MatchedDocument, parse_documents};
    pub use crate::engine::{
        Engine, EngineConfig, SearchMethod, SimulationRequest, SimulationResponse,
    };
    pub use crate::error::{Result, TemuError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
