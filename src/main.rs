use anyhow::Context;
use clap::Parser;
use clausematch::{
    normalize, records_from_path, CatalogueIndex, ClauseMatch, HashingEmbedder, MatchConfig,
    MatchSummary, Matcher, PipelineRun, DEFAULT_EMBEDDING_DIM, DEFAULT_MIN_SIMILARITY,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Match contract clauses against a catalogue of reference clauses
#[derive(Parser, Debug)]
#[command(name = "clausematch")]
#[command(about = "Segment a contract and match its clauses to a catalogue", long_about = None)]
struct Args {
    /// Plain-text contract to segment
    #[arg(short, long)]
    document: PathBuf,

    /// Catalogue JSON file (array of clause records)
    #[arg(short, long)]
    catalogue: PathBuf,

    /// Where to write the JSON report; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Catalogue entries considered per clause
    #[arg(long, default_value_t = 1)]
    top_k: usize,

    /// Minimum similarity for a match to be kept
    #[arg(long, default_value_t = DEFAULT_MIN_SIMILARITY)]
    min_similarity: f32,

    /// Hashing embedder dimension
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIM)]
    dimension: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: MatchSummary,
    matches: &'a [ClauseMatch],
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so a report on stdout stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting clausematch v{}", env!("CARGO_PKG_VERSION"));
    info!("Document: {:?}", args.document);
    info!("Catalogue: {:?}", args.catalogue);

    let config = MatchConfig {
        top_k: args.top_k,
        min_similarity: args.min_similarity,
    };
    config.validate()?;

    let raw = std::fs::read_to_string(&args.document)
        .with_context(|| format!("reading document {:?}", args.document))?;
    let text = normalize(&raw);

    let records = records_from_path(&args.catalogue)
        .with_context(|| format!("reading catalogue {:?}", args.catalogue))?;

    let index = Arc::new(CatalogueIndex::new(Arc::new(HashingEmbedder::new(
        args.dimension,
    ))));
    index
        .load(records)
        .with_context(|| format!("loading catalogue {:?}", args.catalogue))?;

    let matcher = Matcher::new(index);
    let run = PipelineRun::execute(&text, &matcher, &config)?;

    for (entry, matches) in run.matches_by_entry() {
        info!("{}: {} matched clauses", entry, matches.len());
    }
    let summary = run.summary();
    info!(
        "{} of {} clauses matched, {} left unmatched",
        summary.matched_clauses, summary.total_clauses, summary.unmatched_clauses
    );

    let report = Report {
        summary,
        matches: run.matches(),
    };
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing report {:?}", path))?;
            info!("Report written to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
