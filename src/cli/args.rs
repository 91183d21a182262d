//! Command line argument parsing for the temu CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::engine::SearchMethod;

/// Temu - a playground for classic information retrieval methods
#[derive(Parser, Debug, Clone)]
#[command(name = "temu")]
#[command(about = "Run boolean, vector space, BM25, regex and clustering retrieval over plain text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TemuArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TemuArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one retrieval method over a set of documents
    Search(SearchArgs),

    /// Show how raw text is split into documents
    Split(SplitArgs),

    /// Show the normalized form of words
    Stem(StemArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Retrieval method
    #[arg(short, long, value_enum)]
    pub method: MethodArg,

    /// Query string; the number of clusters for `clustering`
    #[arg(long)]
    pub query: String,

    /// File with the raw documents (reads stdin when omitted)
    #[arg(short, long, value_name = "DOCUMENTS_FILE", env = "TEMU_DOCUMENTS")]
    pub documents: Option<PathBuf>,

    /// Seed for clustering restarts
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for splitting documents
#[derive(Parser, Debug, Clone)]
pub struct SplitArgs {
    /// File with the raw documents (reads stdin when omitted)
    #[arg(short, long, value_name = "DOCUMENTS_FILE", env = "TEMU_DOCUMENTS")]
    pub documents: Option<PathBuf>,
}

/// Arguments for stemming
#[derive(Parser, Debug, Clone)]
pub struct StemArgs {
    /// Words or phrases to normalize
    #[arg(value_name = "WORDS", required = true)]
    pub words: Vec<String>,
}

/// Retrieval methods accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodArg {
    Regex,
    Vsm,
    Bm25,
    Boolean,
    Clustering,
    Relevance,
}

impl From<MethodArg> for SearchMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Regex => SearchMethod::Regex,
            MethodArg::Vsm => SearchMethod::Vsm,
            MethodArg::Bm25 => SearchMethod::Bm25,
            MethodArg::Boolean => SearchMethod::Boolean,
            MethodArg::Clustering => SearchMethod::Clustering,
            MethodArg::Relevance => SearchMethod::Relevance,
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
