//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TemuArgs};
use crate::document::MatchedDocument;
use crate::engine::SimulationResponse;
use crate::error::Result;

/// Markers put around highlighted regex matches in human output.
const HIGHLIGHT_OPEN: &str = "[[";
const HIGHLIGHT_CLOSE: &str = "]]";

/// Result structure for document splitting.
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitResult {
    pub documents: Vec<MatchedDocument>,
}

/// One normalized word.
#[derive(Debug, Serialize, Deserialize)]
pub struct StemEntry {
    pub word: String,
    pub stem: String,
}

/// Result structure for stemming.
#[derive(Debug, Serialize, Deserialize)]
pub struct StemResult {
    pub stems: Vec<StemEntry>,
}

/// Results that have a human-readable rendering.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Output a result to stdout in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &TemuArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the specified format.
pub fn write_result<T>(out: &mut dyn Write, message: &str, result: &T, args: &TemuArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

/// Wrap every `(start, end)` character span of `text` in highlight markers.
pub fn highlight(text: &str, spans: &[(usize, usize)]) -> String {
    let mut highlighted = String::with_capacity(text.len() + spans.len() * 4);
    let mut spans = spans.iter().filter(|(start, end)| start < end).peekable();

    for (i, c) in text.chars().enumerate() {
        if let Some(&&(start, _)) = spans.peek()
            && i == start
        {
            highlighted.push_str(HIGHLIGHT_OPEN);
        }
        highlighted.push(c);
        while let Some(&&(_, end)) = spans.peek() {
            if i + 1 < end {
                break;
            }
            if i + 1 == end {
                highlighted.push_str(HIGHLIGHT_CLOSE);
            }
            spans.next();
        }
    }

    highlighted
}

impl HumanOutput for SimulationResponse {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            SimulationResponse::Matches { matches } => {
                writeln!(out, "{} matching documents", matches.len())?;
                for m in matches {
                    writeln!(out)?;
                    writeln!(out, "{} ({} matches)", m.name, m.highlights.len())?;
                    writeln!(out, "  {}", highlight(&m.content, &m.highlights))?;
                }
            }
            SimulationResponse::Message { message } => writeln!(out, "{message}")?,
            SimulationResponse::Ranked {
                ranked_documents,
                message,
            } => {
                if let Some(message) = message {
                    writeln!(out, "{message}")?;
                    writeln!(out)?;
                }
                if ranked_documents.is_empty() {
                    writeln!(out, "No documents ranked.")?;
                }
                for (rank, doc) in ranked_documents.iter().enumerate() {
                    writeln!(out, "{}. {} (score: {:.4})", rank + 1, doc.name, doc.score)?;
                    writeln!(out, "   {}", doc.content)?;
                }
            }
            SimulationResponse::Matched { matched_documents } => {
                writeln!(out, "{} matching documents", matched_documents.len())?;
                for doc in matched_documents {
                    writeln!(out, "  {}: {}", doc.name, doc.content)?;
                }
            }
            SimulationResponse::Clusters(result) => {
                for (label, members) in result.clusters.iter() {
                    writeln!(out, "Cluster {label} ({} documents)", members.len())?;
                    for doc in members {
                        writeln!(out, "  {}: {}", doc.name, doc.content)?;
                    }
                }
                writeln!(
                    out,
                    "{} clusters requested, inertia {:.6}",
                    result.num_clusters, result.inertia
                )?;
            }
            SimulationResponse::Error { error } => writeln!(out, "Error: {error}")?,
        }
        Ok(())
    }
}

impl HumanOutput for SplitResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} documents", self.documents.len())?;
        for doc in &self.documents {
            writeln!(out)?;
            writeln!(out, "[{}] {}", doc.doc_id, doc.name)?;
            for line in doc.content.lines() {
                writeln!(out, "  {line}")?;
            }
        }
        Ok(())
    }
}

impl HumanOutput for StemResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let width = self
            .stems
            .iter()
            .map(|entry| entry.word.chars().count())
            .max()
            .unwrap_or(0);

        for entry in &self.stems {
            let stem = if entry.stem.is_empty() {
                "(removed)"
            } else {
                entry.stem.as_str()
            };
            writeln!(out, "{:<width$}  {stem}", entry.word)?;
        }
        Ok(())
    }
}
