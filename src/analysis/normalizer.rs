//! The text normalizer shared by every retrieval method except regex search.
//!
//! Normalization is: lowercase, split into `\w+` runs, drop bilingual stop
//! words and single-character tokens, then stem each token through a
//! bounded LRU cache. The process-wide instance is [`Normalizer::shared`];
//! tests and embedders that need isolation build their own with
//! [`Normalizer::new`].
//!
//! # Examples
//!
//! ```
//! use temu::analysis::normalizer::{Normalizer, NormalizerConfig};
//!
//! let normalizer = Normalizer::new(NormalizerConfig::default()).unwrap();
//! let tokens = normalizer.normalize("Para petani sedang bermain di kebun, x!");
//!
//! assert_eq!(tokens, vec!["para", "tani", "main", "kebun"]);
//! ```

use std::sync::{Arc, LazyLock};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::stem::cached::DEFAULT_STEM_CACHE_CAPACITY;
use crate::analysis::token_filter::{
    CacheStats, CachedStemmer, IndonesianStemmer, LengthFilter, LowercaseFilter, StemFilter,
    Stemmer, StopFilter,
};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

static SHARED: LazyLock<Arc<Normalizer>> = LazyLock::new(|| Arc::new(Normalizer::default()));

/// Configuration of a [`Normalizer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Maximum number of memoized stems.
    pub cache_capacity: usize,

    /// Tokens shorter than this many characters are dropped.
    pub min_token_length: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            cache_capacity: DEFAULT_STEM_CACHE_CAPACITY,
            min_token_length: 2,
        }
    }
}

/// Tokenize / stop / stem pipeline with a memoizing stemmer.
pub struct Normalizer {
    analyzer: PipelineAnalyzer,
    tokenizer: Arc<RegexTokenizer>,
    stemmer: Arc<CachedStemmer>,
}

impl Normalizer {
    /// Build an isolated normalizer with its own stem cache.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let stemmer = Arc::new(CachedStemmer::new(
            Box::new(IndonesianStemmer::new()),
            config.cache_capacity,
        ));

        let analyzer = PipelineAnalyzer::new(tokenizer.clone())
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(LengthFilter::new(config.min_token_length)))
            .add_filter(Arc::new(StemFilter::with_stemmer(stemmer.clone())))
            .with_name("indonesian");

        Ok(Normalizer {
            analyzer,
            tokenizer,
            stemmer,
        })
    }

    /// The process-wide normalizer.
    pub fn shared() -> Arc<Normalizer> {
        Arc::clone(&SHARED)
    }

    /// Normalize `text` into a sequence of stemmed tokens.
    ///
    /// Never fails: an analysis error is logged and yields no tokens.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        match self.analyzer.analyze(text) {
            Ok(tokens) => tokens.map(|token| token.text).collect(),
            Err(e) => {
                warn!("normalization failed: {e}");
                Vec::new()
            }
        }
    }

    /// Stem a single word through the cache.
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word)
    }

    /// Stem a raw query term the way boolean leaves are matched: lowercase,
    /// stem every word run separately and join the stems with a space.
    ///
    /// Stop words are not removed here.
    pub fn stem_term(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        self.tokenizer
            .words(&lowered)
            .map(|word| self.stemmer.stem(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Counters of the underlying stem cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.stemmer.stats()
    }

    /// Name of the analysis pipeline.
    pub fn name(&self) -> &str {
        self.analyzer.name()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default()).expect("default normalizer pipeline should be valid")
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("analyzer", &self.analyzer)
            .field("cache", &self.stemmer.stats())
            .finish()
    }
}
