//! Unicode lowercasing.
//!
//! ```
//! use temu::analysis::token_filter::Filter;
//! use temu::analysis::token_filter::lowercase::LowercaseFilter;
//! use temu::analysis::token::Token;
//!
//! let tokens = vec![Token::new("Jakarta", 0), Token::new("ÉCOLE", 1)];
//! let lowered: Vec<_> = LowercaseFilter::new()
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//!
//! assert_eq!(lowered, vec!["jakarta", "école"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercases every token.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| token.map_text(str::to_lowercase))))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lowercase_keeps_spans() {
        let tokens = vec![
            Token::with_offsets("Halo", 0, 0, 4),
            Token::with_offsets("DUNIA", 1, 5, 10),
        ];

        let result: Vec<Token> = LowercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result[0].text, "halo");
        assert_eq!(result[1].text, "dunia");
        assert_eq!(result[1].span(), 5..10);
    }

    #[test]
    fn test_lowercase_may_change_byte_length() {
        // U+0130 lowercases to two code points
        let tokens = vec![Token::new("\u{130}stanbul", 0)];
        let result: Vec<Token> = LowercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result[0].text, "i\u{307}stanbul");
    }
}
