//! Minimum-length filter.

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Drops tokens shorter than `min_length` characters.
///
/// With the default of 2 this removes single letters and digits such as
/// "a" or "7" that are not on the stop word list.
#[derive(Clone, Copy, Debug)]
pub struct LengthFilter {
    min_length: usize,
}

impl LengthFilter {
    pub fn new(min_length: usize) -> Self {
        LengthFilter { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_length = self.min_length;
        Ok(Box::new(
            tokens.filter(move |token| token.char_len() >= min_length),
        ))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn apply(filter: LengthFilter, words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(
            apply(LengthFilter::default(), &["x", "ab", "é", "kota"]),
            vec!["ab", "kota"]
        );
    }

    #[test]
    fn test_custom_min_length() {
        let filter = LengthFilter::new(4);
        assert_eq!(filter.min_length(), 4);
        assert_eq!(apply(filter, &["abc", "abcd"]), vec!["abcd"]);
    }
}
