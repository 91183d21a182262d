//! Tokenizers: the first stage of the normalizer, splitting raw text into
//! word tokens.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Splits text into tokens carrying their byte spans.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Short identifier used in analyzer names and debug output.
    fn name(&self) -> &'static str;
}

pub mod regex;

pub use regex::RegexTokenizer;
