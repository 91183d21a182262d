//! Boolean retrieval by set algebra.
//!
//! Every document is reduced to the set of its normalized tokens. A parsed
//! [`BooleanExpr`] is then evaluated bottom-up into a set of document
//! indices: `AND` intersects, `OR` unites and `NOT` complements against all
//! documents.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashSet;
use log::debug;

use crate::analysis::Normalizer;
use crate::document::{Document, MatchedDocument};
use crate::error::{Result, TemuError};
use crate::query::parser::{BooleanExpr, BooleanOp, BooleanQueryParser, MAX_QUERY_DEPTH};

/// Per-document token sets used for term lookup.
#[derive(Debug, Clone, Default)]
pub struct DocumentSetIndex {
    token_sets: Vec<AHashSet<String>>,
}

impl DocumentSetIndex {
    /// Normalize every document into its token set.
    pub fn build(normalizer: &Normalizer, documents: &[Document]) -> Self {
        let token_sets = documents
            .iter()
            .map(|doc| normalizer.normalize(&doc.content).into_iter().collect())
            .collect();

        DocumentSetIndex { token_sets }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.token_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_sets.is_empty()
    }

    /// Indices of the documents containing `term`.
    pub fn postings(&self, term: &str) -> BTreeSet<usize> {
        self.token_sets
            .iter()
            .enumerate()
            .filter(|(_, tokens)| tokens.contains(term))
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of all documents.
    pub fn universe(&self) -> BTreeSet<usize> {
        (0..self.token_sets.len()).collect()
    }
}

impl BooleanExpr {
    /// Evaluate the expression into the sorted set of matching indices.
    pub fn evaluate(&self, index: &DocumentSetIndex) -> BTreeSet<usize> {
        match self {
            BooleanExpr::Term(term) => index.postings(term),
            BooleanExpr::Empty => BTreeSet::new(),
            BooleanExpr::Chain(first, rest) => {
                rest.iter()
                    .fold(first.evaluate(index), |matched, (op, operand)| {
                        let operand = operand.evaluate(index);
                        match op {
                            BooleanOp::And => matched.intersection(&operand).copied().collect(),
                            BooleanOp::Or => matched.union(&operand).copied().collect(),
                        }
                    })
            }
            BooleanExpr::Not(operand) => {
                let operand = operand.evaluate(index);
                index.universe().difference(&operand).copied().collect()
            }
        }
    }
}

/// Boolean search over a request's documents.
#[derive(Debug, Clone)]
pub struct BooleanSearcher {
    normalizer: Arc<Normalizer>,
    max_depth: usize,
}

impl BooleanSearcher {
    pub fn new(normalizer: Arc<Normalizer>) -> Self {
        BooleanSearcher {
            normalizer,
            max_depth: MAX_QUERY_DEPTH,
        }
    }

    /// Override the maximum query depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse `query` and return the matching documents in input order.
    ///
    /// Any failure is reported as [`TemuError::BooleanQuery`].
    pub fn search(&self, query: &str, documents: &[Document]) -> Result<Vec<MatchedDocument>> {
        self.evaluate(query, documents).map_err(|e| match e {
            TemuError::BooleanQuery(_) => e,
            other => TemuError::boolean_query(other.to_string()),
        })
    }

    fn evaluate(&self, query: &str, documents: &[Document]) -> Result<Vec<MatchedDocument>> {
        let expr = BooleanQueryParser::new(&self.normalizer)
            .with_max_depth(self.max_depth)
            .parse(query)?;
        debug!("boolean query parsed as {expr}");

        let index = DocumentSetIndex::build(&self.normalizer, documents);
        let matched = expr
            .evaluate(&index)
            .into_iter()
            .map(|i| MatchedDocument::new(i, &documents[i]))
            .collect();

        Ok(matched)
    }
}
