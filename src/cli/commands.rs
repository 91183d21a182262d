//! Command implementations for the temu CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::Normalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::cluster::KMeansConfig;
use crate::document::{MatchedDocument, parse_documents};
use crate::engine::{Engine, EngineConfig, SearchMethod, SimulationRequest, SimulationResponse};
use crate::error::{Result, TemuError};

/// Execute a CLI command.
pub fn execute_command(args: TemuArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_documents(search_args.clone(), &args),
        Command::Split(split_args) => split_documents(split_args.clone(), &args),
        Command::Stem(stem_args) => stem_words(stem_args.clone(), &args),
    }
}

/// Read the raw document text from `path`, or from stdin when no path is
/// given.
pub fn read_documents(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("reading documents from {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
        None => {
            debug!("reading documents from stdin");
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Build the engine used by the `search` command.
pub fn build_engine(seed: Option<u64>) -> Result<Engine> {
    match seed {
        None => Ok(Engine::default()),
        Some(seed) => Engine::new(EngineConfig {
            kmeans: KMeansConfig {
                seed: Some(seed),
                ..KMeansConfig::default()
            },
            ..EngineConfig::default()
        }),
    }
}

/// Answer a search over already loaded raw documents.
pub fn run_search(args: &SearchArgs, raw_documents: &str) -> Result<SimulationResponse> {
    let engine = build_engine(args.seed)?;
    let method = SearchMethod::from(args.method);
    let request = SimulationRequest::new(method.as_str(), args.query.as_str(), raw_documents);

    let start = Instant::now();
    let response = engine.simulate(&request);
    info!(
        "{method} returned {} documents in {:.2?}",
        response.document_count(),
        start.elapsed()
    );

    Ok(response)
}

/// Run one retrieval method.
fn search_documents(args: SearchArgs, cli_args: &TemuArgs) -> Result<()> {
    let raw = read_documents(args.documents.as_deref())?;
    let response = run_search(&args, &raw)?;

    if let Some(error) = response.error_message() {
        // The JSON shape is part of the output contract, errors included.
        if cli_args.output_format == OutputFormat::Json {
            output_result("Search failed", &response, cli_args)?;
        }
        return Err(TemuError::other(error));
    }

    output_result(
        &format!("{} results for {:?}", SearchMethod::from(args.method), args.query),
        &response,
        cli_args,
    )
}

/// Split raw text into documents.
pub fn split(raw_documents: &str) -> SplitResult {
    let documents = parse_documents(raw_documents)
        .iter()
        .enumerate()
        .map(|(i, doc)| MatchedDocument::new(i, doc))
        .collect();

    SplitResult { documents }
}

fn split_documents(args: SplitArgs, cli_args: &TemuArgs) -> Result<()> {
    let raw = read_documents(args.documents.as_deref())?;
    let result = split(&raw);
    output_result(
        &format!("Split into {} documents", result.documents.len()),
        &result,
        cli_args,
    )
}

/// Normalize words the way documents are normalized.
pub fn stem(normalizer: &Normalizer, words: &[String]) -> StemResult {
    let stems = words
        .iter()
        .map(|word| StemEntry {
            word: word.clone(),
            stem: normalizer.normalize(word).join(" "),
        })
        .collect();

    StemResult { stems }
}

fn stem_words(args: StemArgs, cli_args: &TemuArgs) -> Result<()> {
    let normalizer = Normalizer::shared();
    let result = stem(&normalizer, &args.words);

    let stats = normalizer.cache_stats();
    debug!("stem cache: {} hits, {} misses", stats.hits, stats.misses);

    output_result("Normalized words", &result, cli_args)
}
