//! cogmem - memory-backed assistant CLI
//!
//! ## Commands
//!
//! - `demo`: run the bundled example queries and print session statistics
//! - `ask`: run one or more queries through the pipeline
//! - `stress`: time a batch of synthetic queries

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, Level};

use cogmem_core::{
    Assistant, AssistantConfig, CannedReasoner, QueryReport, ReasoningStrategy, SessionStats,
};

const DEMO_QUERIES: [&str; 3] = [
    "What are the key principles of distributed systems?",
    "How does memory management work in modern operating systems?",
    "Explain the trade-offs between SQL and NoSQL databases",
];

/// Capacity used by the demo unless overridden.
const DEMO_CAPACITY: usize = 1000;

const RULE_WIDTH: usize = 50;

#[derive(Parser)]
#[command(name = "cogmem")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Memory-backed assistant pipeline", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "COGMEM_CONFIG")]
    config: Option<PathBuf>,

    /// Reasoning strategy (chain_of_thought, tree_of_thought, basic)
    #[arg(short, long, global = true, env = "COGMEM_STRATEGY")]
    strategy: Option<ReasoningStrategy>,

    /// Maximum number of records kept in memory
    #[arg(long, global = true, env = "COGMEM_CAPACITY")]
    capacity: Option<usize>,

    /// Pause after each reasoning step, in milliseconds
    #[arg(long, global = true, env = "COGMEM_STEP_DELAY_MS")]
    step_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bundled example queries
    Demo,

    /// Process queries in order and print each report
    Ask {
        /// Queries to process
        #[arg(required = true)]
        queries: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Process a batch of synthetic queries and report latency
    Stress {
        /// Number of queries to process
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    cogmem_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Demo => {
            let config = resolve_config(&cli, Some(DEMO_CAPACITY))?;
            cmd_demo(&config).await
        }
        Commands::Ask {
            ref queries,
            format,
        } => {
            let config = resolve_config(&cli, None)?;
            cmd_ask(&config, queries, format).await
        }
        Commands::Stress { count } => {
            let config = resolve_config(&cli, None)?;
            cmd_stress(&config, count).await
        }
    }
}

/// Merge the config file (if any) with command-line overrides.
///
/// `default_capacity` applies only when neither the file nor the flags set one.
fn resolve_config(cli: &Cli, default_capacity: Option<usize>) -> Result<AssistantConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => {
            let mut config = AssistantConfig::default();
            if let Some(capacity) = default_capacity {
                config.memory.capacity = capacity;
            }
            config
        }
    };

    if let Some(strategy) = cli.strategy {
        config.reasoning.strategy = strategy;
    }
    if let Some(capacity) = cli.capacity {
        config.memory.capacity = capacity;
    }
    if let Some(delay) = cli.step_delay_ms {
        config.reasoning.step_delay_ms = delay;
    }

    config.validate().context("Invalid configuration")?;
    debug!(?config, "resolved configuration");
    Ok(config)
}

fn load_config(path: &Path) -> Result<AssistantConfig> {
    AssistantConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn build_assistant(config: &AssistantConfig) -> Result<Assistant<CannedReasoner>> {
    Assistant::from_config(config).context("Failed to initialise assistant")
}

async fn cmd_demo(config: &AssistantConfig) -> Result<()> {
    let mut assistant = build_assistant(config)?;

    println!("cogmem assistant v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "=".repeat(RULE_WIDTH));

    for query in DEMO_QUERIES {
        println!("\nQuery: {}", query);
        let report = assistant
            .process(query)
            .await
            .with_context(|| format!("Failed to process query: {query}"))?;

        println!("Response: {}", report.response);
        println!("Confidence: {:.2}%", report.confidence * 100.0);
        println!("Reasoning steps: {}", report.reasoning.len());
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    print_stats(&assistant.session_stats());
    Ok(())
}

async fn cmd_ask(config: &AssistantConfig, queries: &[String], format: OutputFormat) -> Result<()> {
    let mut assistant = build_assistant(config)?;

    let mut reports = Vec::with_capacity(queries.len());
    for query in queries {
        let report = assistant
            .process(query)
            .await
            .with_context(|| format!("Failed to process query: {query}"))?;
        if format == OutputFormat::Text {
            print_report(&report);
        }
        reports.push(report);
    }

    if format == OutputFormat::Json {
        let out = serde_json::json!({
            "reports": reports,
            "stats": assistant.session_stats(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

async fn cmd_stress(config: &AssistantConfig, count: usize) -> Result<()> {
    let mut assistant = build_assistant(config)?;
    let started = Instant::now();

    for i in 0..count {
        let query = format!("Query {i}");
        assistant
            .process(&query)
            .await
            .with_context(|| format!("Failed to process query: {query}"))?;
    }

    let elapsed = started.elapsed().as_secs_f64();
    println!("Processed {} queries in {:.2} seconds", count, elapsed);
    if count > 0 {
        println!("  Average: {:.2}ms per query", elapsed / count as f64 * 1000.0);
    }
    let stats = assistant.session_stats();
    println!(
        "  Memories: {} ({:.1}% of capacity, {} evicted)",
        stats.total_memories,
        stats.memory_usage * 100.0,
        stats.evicted_total
    );
    Ok(())
}

fn print_report(report: &QueryReport) {
    println!("Query:      {}", report.query);
    println!("Response:   {}", report.response);
    println!("Confidence: {:.2}%", report.confidence * 100.0);
    println!("Context:    {} record(s)", report.context_used);
    for (i, step) in report.reasoning.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, step);
    }
    println!("{}", "-".repeat(RULE_WIDTH));
}

fn print_stats(stats: &SessionStats) {
    println!("\nSession Statistics:");
    println!("  session_id: {}", stats.session_id);
    println!("  total_memories: {}", stats.total_memories);
    println!("  session_duration: {:.3}s", stats.session_duration_secs);
    println!("  reasoning_strategy: {}", stats.reasoning_strategy);
    println!("  memory_usage: {:.4}", stats.memory_usage);
    println!("  queries_processed: {}", stats.queries_processed);
    println!("  evicted_total: {}", stats.evicted_total);
}
