//! Word tokenizer driven by a regular expression.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, TemuError};

/// Pattern of a word: a maximal run of letters, digits or underscores.
pub const WORD_PATTERN: &str = r"\w+";

/// Emits one token per match of its pattern; everything between matches is
/// a separator.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Tokenizer for [`WORD_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(WORD_PATTERN)
    }

    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| TemuError::analysis(format!("invalid tokenizer pattern: {e}")))?;
        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The matched words as slices of `text`.
    pub fn words<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.pattern.find_iter(text).map(|mat| mat.as_str())
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        // Tokens own their text, so the stream does not borrow `text`.
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| Token::with_offsets(mat.as_str(), position, mat.start(), mat.end()))
            .collect();
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_carry_byte_spans() {
        let tokens: Vec<Token> = RegexTokenizer::new()
            .unwrap()
            .tokenize("Kopi, teh; susu!")
            .unwrap()
            .collect();

        let spans: Vec<(&str, usize, std::ops::Range<usize>)> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.position, t.span()))
            .collect();
        assert_eq!(
            spans,
            vec![("Kopi", 0, 0..4), ("teh", 1, 6..9), ("susu", 2, 11..15)]
        );
    }

    #[test]
    fn test_unicode_letters_are_word_characters() {
        let tokens: Vec<Token> = RegexTokenizer::new()
            .unwrap()
            .tokenize("café olé")
            .unwrap()
            .collect();
        assert_eq!(tokens[1].span(), 6..10);
    }

    #[test]
    fn test_words_split_on_punctuation() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let words: Vec<&str> = tokenizer.words("snake_case v2.0 (x) anti-virus").collect();

        assert_eq!(words, vec!["snake_case", "v2", "0", "x", "anti", "virus"]);
        assert_eq!(tokenizer.pattern(), WORD_PATTERN);
        assert_eq!(tokenizer.name(), "regex");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = RegexTokenizer::with_pattern("(");
        assert!(matches!(result, Err(TemuError::Analysis(_))));
    }
}
