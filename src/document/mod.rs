//! Document module.
//!
//! Documents are plain `{name, content}` records identified by their
//! 1-based position in the request. [`parser`] turns a raw text blob into
//! such a list.

#[allow(clippy::module_inception)]
pub mod document;
pub mod parser;

// Re-export commonly used types
pub use document::{Document, MatchedDocument};
pub use parser::parse_documents;
