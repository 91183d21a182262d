//! Splitting of a raw text blob into named documents.
//!
//! Two layouts are understood:
//!
//! - explicit headers, `--- Document: Name ---` followed by the content;
//! - otherwise blank-line separated paragraphs, auto-named `Document N`.
//!
//! # Examples
//!
//! ```
//! use temu::document::parser::parse_documents;
//!
//! let docs = parse_documents("--- Document: Cats ---\nthe cat sat\n--- Document: Dogs ---\nthe dog ran");
//! assert_eq!(docs.len(), 2);
//! assert_eq!(docs[0].name, "Cats");
//! assert_eq!(docs[1].content, "the dog ran");
//!
//! let docs = parse_documents("first paragraph\n\nsecond paragraph");
//! assert_eq!(docs[1].name, "Document 2");
//! ```

use log::debug;

use crate::document::document::Document;

/// Marker that starts a named document.
pub const DOCUMENT_HEADER: &str = "--- Document:";

const HEADER_END: &str = "---";

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split `raw` into documents.
///
/// Parts without content are skipped. With paragraph splitting the `N` in
/// `Document N` is the position among all parts, so skipped blank parts
/// still advance it.
pub fn parse_documents(raw: &str) -> Vec<Document> {
    let documents = if raw.contains(DOCUMENT_HEADER) {
        parse_headed(raw)
    } else {
        parse_paragraphs(raw)
    };

    debug!("parsed {} documents from {} bytes", documents.len(), raw.len());
    documents
}

fn parse_headed(raw: &str) -> Vec<Document> {
    raw.split(DOCUMENT_HEADER)
        .filter(|part| !part.trim().is_empty())
        .filter_map(|part| {
            let header_end = part.find(HEADER_END)?;
            let name = part[..header_end].trim();
            let content = part[header_end + HEADER_END.len()..].trim();
            (!content.is_empty()).then(|| Document::new(name, content))
        })
        .collect()
}

fn parse_paragraphs(raw: &str) -> Vec<Document> {
    raw.split(PARAGRAPH_SEPARATOR)
        .enumerate()
        .filter(|(_, part)| !part.trim().is_empty())
        .map(|(i, part)| Document::new(format!("Document {}", i + 1), part.trim()))
        .collect()
}
