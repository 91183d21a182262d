//! Case-insensitive regular expression matching over raw document text.
//!
//! # Examples
//!
//! ```
//! use temu::document::Document;
//! use temu::query::regex::{RegexMatcher, RegexOutcome};
//!
//! let docs = vec![Document::new("A", "Kucing dan kucing")];
//! let outcome = RegexMatcher::new("KUCING").unwrap().search(&docs);
//!
//! match outcome {
//!     RegexOutcome::Matches(matches) => assert_eq!(matches[0].highlights, vec![(0, 6), (11, 17)]),
//!     RegexOutcome::NoMatches => unreachable!(),
//! }
//! ```

use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Result, TemuError};

/// Message returned when no document matches.
pub const NO_MATCHES_MESSAGE: &str = "No matches found for the given regular expression.";

/// A document with at least one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegexMatch {
    pub doc_id: usize,
    pub name: String,
    pub content: String,

    /// `(start, end)` character offsets of every non-overlapping match
    pub highlights: Vec<(usize, usize)>,
}

/// Result of a regex search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegexOutcome {
    /// Matching documents in input order; never empty
    Matches(Vec<RegexMatch>),
    /// No document matched
    NoMatches,
}

impl RegexOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, RegexOutcome::NoMatches)
    }
}

/// A compiled case-insensitive pattern.
#[derive(Clone, Debug)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern` case-insensitively.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| TemuError::invalid_regex(e.to_string()))?;

        Ok(RegexMatcher { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Character spans of all matches in `text`.
    pub fn highlights(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut byte_cursor = 0;
        let mut char_cursor = 0;

        // Matches are ordered and non-overlapping, so the byte to char
        // conversion walks the text once.
        for mat in self.regex.find_iter(text) {
            char_cursor += text[byte_cursor..mat.start()].chars().count();
            let start = char_cursor;
            char_cursor += mat.as_str().chars().count();
            byte_cursor = mat.end();
            spans.push((start, char_cursor));
        }

        spans
    }

    /// Search every document.
    pub fn search(&self, documents: &[Document]) -> RegexOutcome {
        let matches: Vec<RegexMatch> = documents
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| {
                let highlights = self.highlights(&doc.content);
                (!highlights.is_empty()).then(|| RegexMatch {
                    doc_id: i + 1,
                    name: doc.name.clone(),
                    content: doc.content.clone(),
                    highlights,
                })
            })
            .collect();

        debug!(
            "regex {:?} matched {} of {} documents",
            self.pattern(),
            matches.len(),
            documents.len()
        );

        if matches.is_empty() {
            RegexOutcome::NoMatches
        } else {
            RegexOutcome::Matches(matches)
        }
    }
}

/// Compile `pattern` and search `documents` with it.
pub fn regex_search(pattern: &str, documents: &[Document]) -> Result<RegexOutcome> {
    Ok(RegexMatcher::new(pattern)?.search(documents))
}
