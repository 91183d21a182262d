//! Analyzers: a tokenizer plus an ordered list of filters.

#[allow(clippy::module_inception)]
mod analyzer;
mod pipeline;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
