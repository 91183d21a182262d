//! Boolean query parser.
//!
//! Queries are infix expressions over search terms with the case-sensitive
//! operators `AND`, `OR` and `NOT` plus grouping parentheses:
//!
//! ```text
//! expression := term ( ("AND" | "OR" | "NOT") term )*
//! term       := "NOT" term | "(" expression ")" | LEAF
//! ```
//!
//! Operators fold strictly left to right with no precedence between `AND`
//! and `OR`. A `NOT` between two terms means "and not". The parser is
//! lenient: a `)` or a bare term where an operator is expected ends the
//! expression, a missing `)` is accepted, and a missing operand is the
//! empty expression.
//!
//! # Examples
//!
//! ```
//! use temu::analysis::Normalizer;
//! use temu::query::parser::{BooleanExpr, BooleanQueryParser};
//!
//! let normalizer = Normalizer::shared();
//! let parser = BooleanQueryParser::new(&normalizer);
//!
//! let expr = parser.parse("kucing AND (anjing OR kuda)").unwrap();
//! assert_eq!(expr.to_string(), "(kucing AND (anjing OR kuda))");
//!
//! let expr = parser.parse("bermain NOT bola").unwrap();
//! assert_eq!(
//!     expr,
//!     BooleanExpr::and(BooleanExpr::term("main"), BooleanExpr::not(BooleanExpr::term("bola")))
//! );
//! ```

use std::fmt;

use log::trace;

use crate::analysis::Normalizer;
use crate::error::{Result, TemuError};

/// Maximum nesting of a parsed expression, counting parentheses and unary
/// `NOT`. Operator chains are flat and never count against it.
pub const MAX_QUERY_DEPTH: usize = 256;

const AND: &str = "AND";
const OR: &str = "OR";
const NOT: &str = "NOT";
const OPEN_PAREN: &str = "(";
const CLOSE_PAREN: &str = ")";

/// A binary operator inside a [`BooleanExpr::Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Both sides must match
    And,
    /// Either side may match
    Or,
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOp::And => f.write_str(AND),
            BooleanOp::Or => f.write_str(OR),
        }
    }
}

/// A parsed boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooleanExpr {
    /// A stemmed search term
    Term(String),
    /// An operand followed by operators applied strictly left to right
    Chain(Box<BooleanExpr>, Vec<(BooleanOp, BooleanExpr)>),
    /// Complement against every document
    Not(Box<BooleanExpr>),
    /// A missing operand; matches nothing
    Empty,
}

impl BooleanExpr {
    pub fn term<S: Into<String>>(term: S) -> Self {
        BooleanExpr::Term(term.into())
    }

    /// Append `op right` to `left`, extending `left` if it already is a chain.
    pub fn chain(left: BooleanExpr, op: BooleanOp, right: BooleanExpr) -> Self {
        match left {
            BooleanExpr::Chain(first, mut rest) => {
                rest.push((op, right));
                BooleanExpr::Chain(first, rest)
            }
            left => BooleanExpr::Chain(Box::new(left), vec![(op, right)]),
        }
    }

    pub fn and(left: BooleanExpr, right: BooleanExpr) -> Self {
        Self::chain(left, BooleanOp::And, right)
    }

    pub fn or(left: BooleanExpr, right: BooleanExpr) -> Self {
        Self::chain(left, BooleanOp::Or, right)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: BooleanExpr) -> Self {
        BooleanExpr::Not(Box::new(operand))
    }

    /// `left` without the documents matched by `right`.
    pub fn and_not(left: BooleanExpr, right: BooleanExpr) -> Self {
        Self::and(left, Self::not(right))
    }

    /// Nesting depth; a leaf has depth 1 and a chain adds one level over
    /// its deepest operand.
    pub fn depth(&self) -> usize {
        match self {
            BooleanExpr::Term(_) | BooleanExpr::Empty => 1,
            BooleanExpr::Not(operand) => 1 + operand.depth(),
            BooleanExpr::Chain(first, rest) => {
                1 + rest
                    .iter()
                    .map(|(_, operand)| operand.depth())
                    .fold(first.depth(), usize::max)
            }
        }
    }

    /// All leaf terms, left to right.
    pub fn terms(&self) -> Vec<&str> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, terms: &mut Vec<&'a str>) {
        match self {
            BooleanExpr::Term(term) => terms.push(term),
            BooleanExpr::Empty => {}
            BooleanExpr::Not(operand) => operand.collect_terms(terms),
            BooleanExpr::Chain(first, rest) => {
                first.collect_terms(terms);
                for (_, operand) in rest {
                    operand.collect_terms(terms);
                }
            }
        }
    }
}

impl fmt::Display for BooleanExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanExpr::Term(term) => write!(f, "{term}"),
            // Printed fully parenthesized: `((a OR b) AND c)`
            BooleanExpr::Chain(first, rest) => {
                for _ in rest {
                    f.write_str("(")?;
                }
                write!(f, "{first}")?;
                for (op, operand) in rest {
                    write!(f, " {op} {operand})")?;
                }
                Ok(())
            }
            BooleanExpr::Not(operand) => write!(f, "NOT {operand}"),
            BooleanExpr::Empty => write!(f, "<empty>"),
        }
    }
}

/// Split a query into operator, parenthesis and term tokens.
pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .trim()
        .replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Parser turning query strings into [`BooleanExpr`] trees.
///
/// Leaf terms are stemmed with [`Normalizer::stem_term`] so they compare
/// equal to the normalized document tokens.
#[derive(Debug, Clone, Copy)]
pub struct BooleanQueryParser<'a> {
    normalizer: &'a Normalizer,
    max_depth: usize,
}

impl<'a> BooleanQueryParser<'a> {
    /// Create a parser stemming leaves with `normalizer`.
    pub fn new(normalizer: &'a Normalizer) -> Self {
        BooleanQueryParser {
            normalizer,
            max_depth: MAX_QUERY_DEPTH,
        }
    }

    /// Override the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Parse `query`.
    ///
    /// Only nesting deeper than the configured limit is an error; every
    /// other input, however long, yields some (possibly empty) expression.
    pub fn parse(&self, query: &str) -> Result<BooleanExpr> {
        let mut state = ParseState {
            tokens: tokenize_query(query),
            position: 0,
            parser: self,
        };
        let expr = state.parse_expression(0)?;

        if state.position < state.tokens.len() {
            trace!(
                "boolean query parse stopped at token {} of {}",
                state.position,
                state.tokens.len()
            );
        }

        Ok(expr)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(TemuError::boolean_query(format!(
                "query nesting exceeds {} levels",
                self.max_depth
            )));
        }
        Ok(())
    }
}

struct ParseState<'p, 'a> {
    tokens: Vec<String>,
    position: usize,
    parser: &'p BooleanQueryParser<'a>,
}

impl ParseState<'_, '_> {
    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    /// Operators are collected into one flat chain, so a long chain costs
    /// no recursion.
    fn parse_expression(&mut self, nesting: usize) -> Result<BooleanExpr> {
        let first = self.parse_term(nesting)?;
        let mut rest = Vec::new();

        loop {
            let (op, negated) = match self.peek() {
                Some(AND) => (BooleanOp::And, false),
                Some(OR) => (BooleanOp::Or, false),
                Some(NOT) => (BooleanOp::And, true),
                // `)`, a bare term or the end of input
                _ => break,
            };
            self.position += 1;

            let operand = if negated {
                BooleanExpr::not(self.parse_term(nesting + 1)?)
            } else {
                self.parse_term(nesting)?
            };
            rest.push((op, operand));
        }

        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(BooleanExpr::Chain(Box::new(first), rest))
        }
    }

    fn parse_term(&mut self, nesting: usize) -> Result<BooleanExpr> {
        self.parser.check_depth(nesting + 1)?;

        let Some(token) = self.peek() else {
            return Ok(BooleanExpr::Empty);
        };

        match token {
            NOT => {
                self.position += 1;
                Ok(BooleanExpr::not(self.parse_term(nesting + 1)?))
            }
            OPEN_PAREN => {
                self.position += 1;
                let expr = self.parse_expression(nesting + 1)?;
                if self.peek() == Some(CLOSE_PAREN) {
                    self.position += 1;
                }
                Ok(expr)
            }
            _ => {
                let term = self.parser.normalizer.stem_term(token);
                self.position += 1;
                Ok(BooleanExpr::Term(term))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NormalizerConfig;

    fn normalizer() -> Normalizer {
        Normalizer::new(NormalizerConfig::default()).unwrap()
    }

    fn parse(query: &str) -> BooleanExpr {
        let normalizer = normalizer();
        BooleanQueryParser::new(&normalizer).parse(query).unwrap()
    }

    fn term(t: &str) -> BooleanExpr {
        BooleanExpr::term(t)
    }

    #[test]
    fn test_tokenize_query_pads_parentheses() {
        assert_eq!(
            tokenize_query("  (cat OR dog)AND  NOT(bird) "),
            vec!["(", "cat", "OR", "dog", ")", "AND", "NOT", "(", "bird", ")"]
        );
        assert!(tokenize_query("   ").is_empty());
    }

    #[test]
    fn test_single_term_is_stemmed() {
        assert_eq!(parse("Bermain"), term("main"));
    }

    #[test]
    fn test_left_to_right_folding_without_precedence() {
        assert_eq!(
            parse("a1 OR b1 AND c1"),
            BooleanExpr::and(BooleanExpr::or(term("a1"), term("b1")), term("c1"))
        );
    }

    #[test]
    fn test_binary_not_is_and_not() {
        assert_eq!(
            parse("cat NOT dog"),
            BooleanExpr::and(term("cat"), BooleanExpr::not(term("dog")))
        );
    }

    #[test]
    fn test_unary_not_and_grouping() {
        assert_eq!(
            parse("NOT (cat OR dog)"),
            BooleanExpr::not(BooleanExpr::or(term("cat"), term("dog")))
        );
        assert_eq!(parse("NOT NOT cat"), BooleanExpr::not(BooleanExpr::not(term("cat"))));
    }

    #[test]
    fn test_operators_are_case_sensitive() {
        // "and" in operator position is a bare term and ends the expression
        assert_eq!(parse("cat and dog"), term("cat"));
    }

    #[test]
    fn test_bare_term_ends_expression() {
        assert_eq!(parse("cat dog OR bird"), term("cat"));
    }

    #[test]
    fn test_missing_close_paren_is_tolerated() {
        assert_eq!(
            parse("(cat AND dog"),
            BooleanExpr::and(term("cat"), term("dog"))
        );
    }

    #[test]
    fn test_stray_close_paren_ends_expression() {
        assert_eq!(parse("cat ) AND dog"), term("cat"));
    }

    #[test]
    fn test_missing_operand_is_empty() {
        assert_eq!(parse(""), BooleanExpr::Empty);
        assert_eq!(
            parse("cat AND"),
            BooleanExpr::and(term("cat"), BooleanExpr::Empty)
        );
        assert_eq!(parse("NOT"), BooleanExpr::not(BooleanExpr::Empty));
    }

    #[test]
    fn test_punctuated_leaf_keeps_inner_space() {
        assert_eq!(parse("foo-bar"), term("foo bar"));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let normalizer = normalizer();
        let parser = BooleanQueryParser::new(&normalizer);

        let query = format!("{}cat{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = parser.parse(&query).unwrap_err();
        assert!(matches!(err, TemuError::BooleanQuery(_)));

        let query = format!("{}cat", "NOT ".repeat(10_000));
        assert!(parser.parse(&query).is_err());

        let query = format!("cat{}", " NOT cat".repeat(10_000));
        assert!(parser.parse(&query).is_ok());
    }

    #[test]
    fn test_long_chain_is_flat() {
        let normalizer = normalizer();
        let parser = BooleanQueryParser::new(&normalizer);

        let query = vec!["cat"; 100_000].join(" OR ");
        let expr = parser.parse(&query).unwrap();
        assert_eq!(expr.depth(), 2);
        assert_eq!(expr.terms().len(), 100_000);

        let BooleanExpr::Chain(first, rest) = expr else {
            panic!("expected a chain");
        };
        assert_eq!(*first, term("cat"));
        assert!(rest.iter().all(|(op, operand)| *op == BooleanOp::Or && *operand == term("cat")));
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let normalizer = normalizer();
        let parser = BooleanQueryParser::new(&normalizer);

        let query = format!("{}cat{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(parser.parse(&query).unwrap(), term("cat"));

        let query = format!("{}cat", "NOT ".repeat(100));
        assert_eq!(parser.parse(&query).unwrap().depth(), 101);
    }

    #[test]
    fn test_custom_depth_limit() {
        let normalizer = normalizer();
        let parser = BooleanQueryParser::new(&normalizer).with_max_depth(2);

        assert!(parser.parse("cat AND dog AND bird").is_ok());
        assert!(parser.parse("(cat AND dog)").is_ok());
        assert!(parser.parse("(cat AND (dog))").is_err());
        assert!(parser.parse("NOT NOT cat").is_err());
    }

    #[test]
    fn test_terms_and_display() {
        let expr = parse("(cat OR dog) NOT bird");
        assert_eq!(expr.terms(), vec!["cat", "dog", "bird"]);
        assert_eq!(expr.to_string(), "((cat OR dog) AND NOT bird)");
    }
}
