//! # position-inference CLI
//!
//! Thin command-line caller of the engine: one subcommand per query
//! operation, every answer printed to stdout as pretty JSON. Logs go to
//! stderr so the output can be piped straight into `jq`.
//!
//! ```bash
//! position-inference --positions data/positions.json query "is causation correlation"
//! RUST_LOG=debug position-inference chain 42 --depth 5
//! PRIMARY_THINKER=hume position-inference dialectic causation
//! ```
//!
//! Unknown ids and topics are answers, not failures: they print
//! `{"error": "..."}` and exit 0.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use position_inference::config::{DEFAULT_POSITIONS_PATH, DEFAULT_PRIMARY_THINKER, DEFAULT_RULES_PATH};
use position_inference::core::{Domain, PositionId};
use position_inference::{Engine, EngineConfig, QueryError};

#[derive(Parser)]
#[command(
    name = "position-inference",
    version,
    about = "Query a corpus of philosophical positions and their inferred relations"
)]
struct Cli {
    /// JSON array of position records.
    #[arg(long, global = true, env = "POSITIONS_FILE", default_value = DEFAULT_POSITIONS_PATH)]
    positions: PathBuf,

    /// JSON array of rule records.
    #[arg(long, global = true, env = "RULES_FILE", default_value = DEFAULT_RULES_PATH)]
    rules: PathBuf,

    /// Thinker that `infer`, `critique` and `dialectic` draw from.
    #[arg(long, global = true, env = "PRIMARY_THINKER", default_value = DEFAULT_PRIMARY_THINKER)]
    primary_thinker: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank positions by relevance to a free-text query.
    Query {
        text: String,
        #[arg(long, default_value = "15")]
        max: usize,
        #[arg(long)]
        thinker: Option<String>,
        #[arg(long, value_parser = parse_domain)]
        domain: Option<Domain>,
    },
    /// Rules activated by a query.
    Rules { text: String },
    /// Rule and semantic hits merged, plus one entailment hop.
    Infer {
        text: String,
        #[arg(long, default_value = "20")]
        max: usize,
    },
    /// Breadth-first entailment chain from a position.
    Chain {
        id: PositionId,
        #[arg(long, default_value = "3")]
        depth: usize,
    },
    /// Positions contradicting a position.
    Contradictions { id: PositionId },
    /// Positions a position is a more specific instance of.
    Specializations { id: PositionId },
    /// Thesis/antithesis pairs on a topic.
    Dialectic { topic: String },
    /// Agreements and disagreements between two thinkers.
    Compare {
        thinker1: String,
        thinker2: String,
        #[arg(long)]
        topic: Option<String>,
    },
    /// Primary-thinker positions bearing on a claim.
    Critique {
        claim: String,
        #[arg(long, default_value = "10")]
        max: usize,
    },
    /// Positions whose topic matches.
    Topic {
        topic: String,
        #[arg(long)]
        thinker: Option<String>,
    },
    /// Positions classified under a domain.
    Domain {
        #[arg(value_parser = parse_domain)]
        domain: Domain,
        #[arg(long)]
        thinker: Option<String>,
        #[arg(long, default_value = "50")]
        max: usize,
    },
    /// Topics sharing a word with a topic.
    RelatedTopics { topic: String },
    /// All topics, or one thinker's topics.
    Topics {
        #[arg(long)]
        thinker: Option<String>,
    },
    /// All thinkers.
    Thinkers,
    /// Corpus-wide counts.
    Stats,
}

fn parse_domain(s: &str) -> Result<Domain, String> {
    Domain::parse(s).ok_or_else(|| {
        let known: Vec<&str> = Domain::ALL.iter().map(|d| d.as_str()).collect();
        format!("unknown domain '{s}', expected one of: {}", known.join(", "))
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = EngineConfig::default()
        .with_positions_path(cli.positions)
        .with_rules_path(cli.rules)
        .with_primary_thinker(&cli.primary_thinker);
    let engine = Engine::new(config);

    match cli.command {
        Commands::Query {
            text,
            max,
            thinker,
            domain,
        } => print(&engine.query(&text, max, thinker.as_deref(), domain)),
        Commands::Rules { text } => print(&engine.apply_rules(&text)),
        Commands::Infer { text, max } => print(&engine.infer(&text, max)),
        Commands::Chain { id, depth } => print_result(engine.forward_chain(id, depth)),
        Commands::Contradictions { id } => print_result(engine.find_contradictions(id)),
        Commands::Specializations { id } => print_result(engine.find_specializations(id)),
        Commands::Dialectic { topic } => print_result(engine.dialectical_analysis(&topic)),
        Commands::Compare {
            thinker1,
            thinker2,
            topic,
        } => print(&engine.compare_thinkers(&thinker1, &thinker2, topic.as_deref())),
        Commands::Critique { claim, max } => print(&engine.critique(&claim, max)),
        Commands::Topic { topic, thinker } => {
            print(&engine.get_positions_by_topic(&topic, thinker.as_deref()))
        }
        Commands::Domain {
            domain,
            thinker,
            max,
        } => print(&engine.get_positions_by_domain(domain, thinker.as_deref(), max)),
        Commands::RelatedTopics { topic } => print(&engine.get_related_topics(&topic)),
        Commands::Topics { thinker } => print(&engine.get_all_topics(thinker.as_deref())),
        Commands::Thinkers => print(&engine.get_all_thinkers()),
        Commands::Stats => print(&engine.statistics()),
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}

fn print_result<T: Serialize>(result: Result<T, QueryError>) -> Result<()> {
    match result {
        Ok(value) => print(&value),
        Err(err) => print(&err),
    }
}
