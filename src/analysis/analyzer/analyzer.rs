//! The analyzer seam used by the normalizer.
//!
//! ```text
//! raw text ─▶ tokenizer ─▶ lowercase ─▶ stop ─▶ length ─▶ stem ─▶ tokens
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Turns raw text into normalized tokens.
///
/// `Send + Sync` so one analyzer can back the process-wide normalizer.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    fn name(&self) -> &str;
}
