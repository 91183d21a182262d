//! Stop filter implementation.
//!
//! Removes function words that carry no retrieval signal. The default list
//! is bilingual: Indonesian conjunctions, prepositions, auxiliaries and
//! pronouns, followed by common English function words.
//!
//! # Examples
//!
//! ```
//! use temu::analysis::token_filter::Filter;
//! use temu::analysis::token_filter::stop::StopFilter;
//! use temu::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("buku", 1),
//!     Token::new("dan", 2),
//!     Token::new("pena", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "buku");
//! assert_eq!(result[1].text, "pena");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

const DEFAULT_INDONESIAN_STOP_WORDS: &[&str] = &[
    "dan", "atau", "tetapi", "tapi", "namun", "sedangkan", "melainkan", "padahal", "jika", "bila",
    "kalau", "supaya", "agar", "untuk", "guna", "bagi", "demi", "karena", "sebab", "maka",
    "sehingga", "sampai", "hingga", "yang", "ini", "itu", "pada", "di", "ke", "dari", "oleh",
    "dengan", "secara", "menurut", "antara", "adalah", "ialah", "merupakan", "yaitu", "yakni",
    "seperti", "bagai", "bagaikan", "laksana", "bak", "tentang", "mengenai", "terhadap", "akan",
    "sedang", "telah", "sudah", "belum", "bisa", "dapat", "harus", "wajib", "mesti", "boleh",
    "mungkin", "barangkali", "pasti", "tentu", "tidak", "bukan", "jangan", "sekali", "sangat",
    "amat", "paling", "lebih", "kurang", "cukup", "terlalu", "hanya", "cuma", "saja", "lagi",
    "pun", "juga", "kan", "lah", "kah", "tah", "ada", "tiada", "saya", "aku", "kita", "kami",
    "anda", "kamu", "dia", "mereka", "apa", "siapa", "kapan", "dimana", "mengapa", "bagaimana",
    "berapa",
];

const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "and", "or", "but", "if", "then", "else", "when", "at", "from", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above", "below", "to",
    "of", "in", "on", "off", "over", "under", "again", "further", "once", "here", "there",
    "where", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "can", "will",
    "just", "should", "now", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "do", "does", "did", "a", "an", "the",
];

/// Default bilingual (Indonesian + English) stop words as a HashSet.
pub static DEFAULT_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_INDONESIAN_STOP_WORDS
        .iter()
        .chain(DEFAULT_ENGLISH_STOP_WORDS)
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// Comparison is exact, so the filter belongs after lowercasing in a
/// pipeline.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default bilingual stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        Ok(Box::new(
            tokens.filter(move |token| !stop_words.contains(&token.text)),
        ))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
