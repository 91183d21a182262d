//! Document records shared by every retrieval method.

use serde::{Deserialize, Serialize};

/// A named piece of text.
///
/// A document has no identity beyond its position in the list it was
/// submitted in; callers see it as `docId = index + 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display name of the document
    pub name: String,

    /// Raw, non-normalized text
    pub content: String,
}

impl Document {
    /// Create a new document.
    pub fn new<N: Into<String>, C: Into<String>>(name: N, content: C) -> Self {
        Document {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Build a document list from bare contents, auto-named `Document N`.
    pub fn from_contents<I, S>(contents: I) -> Vec<Document>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| Document::new(format!("Document {}", i + 1), content))
            .collect()
    }
}

/// A document selected by a filtering method, without a score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedDocument {
    /// 1-based position of the document in the request
    pub doc_id: usize,
    pub name: String,
    pub content: String,
}

impl MatchedDocument {
    /// Describe the document at 0-based `index`.
    pub fn new(index: usize, document: &Document) -> Self {
        MatchedDocument {
            doc_id: index + 1,
            name: document.name.clone(),
            content: document.content.clone(),
        }
    }
}
