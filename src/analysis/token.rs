//! Token types for text analysis.
//!
//! A [`Token`] is one word on its way through the normalizer. Filters may
//! rewrite its text (lowercasing, stemming) or drop it (stop words, short
//! words); the source span always points at the raw input.
//!
//! # Examples
//!
//! ```
//! use temu::analysis::token::Token;
//!
//! let token = Token::with_offsets("Bermain", 1, 4, 11).map_text(|t| t.to_lowercase());
//! assert_eq!(token.text, "bermain");
//! assert_eq!(token.span(), 4..11);
//! ```

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A word of the input and where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    /// Index of the word among all words of the input, before any filter
    pub position: usize,

    /// Byte span in the raw input
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte range of the token in the raw input.
    pub fn span(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }

    /// Replace the text, keeping position and span.
    pub fn map_text<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        self.text = f(&self.text);
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Tokens flowing between pipeline stages.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
