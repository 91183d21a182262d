//! Stemming: the [`Stemmer`] seam, its implementations and the filter that
//! applies one to a token stream.

use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

pub mod cached;
pub mod indonesian;

pub use cached::{CacheStats, CachedStemmer};
pub use indonesian::IndonesianStemmer;

/// Filter that applies stemming to tokens.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the Indonesian stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Arc::new(IndonesianStemmer::new()),
        }
    }

    /// Create a stem filter with a custom (possibly shared) stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }

}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(Box::new(
            tokens.map(move |token| token.map_text(|text| stemmer.stem(text))),
        ))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
