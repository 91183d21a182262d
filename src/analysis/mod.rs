//! Text analysis: tokenization, filtering and the shared normalizer.

pub mod analyzer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use normalizer::{Normalizer, NormalizerConfig};
pub use token::{Token, TokenStream};
pub use token_filter::{
    CacheStats, CachedStemmer, Filter, IndonesianStemmer, LengthFilter, LowercaseFilter,
    StemFilter, Stemmer, StopFilter,
};
pub use tokenizer::{RegexTokenizer, Tokenizer};
