//! Token filters: the stages after tokenization that rewrite or drop
//! tokens.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// One stage of the normalizer.
///
/// Filters wrap the incoming stream lazily; nothing is evaluated until the
/// analyzer's caller consumes the tokens.
pub trait Filter: Send + Sync {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Short identifier used in debug output.
    fn name(&self) -> &'static str;
}

pub mod length;
pub mod lowercase;
pub mod stem;
pub mod stop;

pub use length::LengthFilter;
pub use lowercase::LowercaseFilter;
pub use stem::{CacheStats, CachedStemmer, IndonesianStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
