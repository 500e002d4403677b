//! nomi-cli — Operator interface for the Nomi candidate engine.
//!
//! Runs admission, scoring, and round partitioning over a chain snapshot
//! file and prints the results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nomi_core::constants::perbill_to_percent;
use nomi_engine::CandidateEngine;
use nomi_node::logging::init_logging;
use nomi_node::{MemoryScoreStore, NodeConfig, Snapshot, SnapshotChainData, build_engine};
use tracing::info;

/// Nomi candidate engine command-line interface.
#[derive(Parser)]
#[command(name = "nomi-cli")]
#[command(version, about = "Validator candidate admission and ranking")]
struct Cli {
    /// Config file (default: <config dir>/nomi/config.toml, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json"). Overrides the config file.
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and score the snapshot's candidates, print the ranking.
    Score(ScoreArgs),
    /// Run every admission rule and print the invalid candidates.
    Invalid(SnapshotArgs),
    /// Split the snapshot's nominated stashes into good and bad.
    Partition(SnapshotArgs),
}

#[derive(Args)]
struct SnapshotArgs {
    /// Path to a JSON chain snapshot.
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ScoreArgs {
    #[command(flatten)]
    input: SnapshotArgs,

    /// Write the score store contents to this file after the pass.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = NodeConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    init_logging(&config.log_level, &config.log_format).context("failed to initialise logging")?;

    match cli.command {
        Commands::Score(args) => score(&config, args).await,
        Commands::Invalid(args) => invalid(&config, args).await,
        Commands::Partition(args) => partition(&config, args).await,
    }
}

/// Load a snapshot and build an engine over it.
fn open(
    config: &NodeConfig,
    path: &Path,
) -> Result<(Snapshot, CandidateEngine, Arc<MemoryScoreStore>)> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    info!(
        candidates = snapshot.candidates.len(),
        era = snapshot.active_era,
        "snapshot loaded"
    );

    let store = Arc::new(MemoryScoreStore::new(snapshot.latest_release.clone()));
    let chain = Arc::new(SnapshotChainData::new(&snapshot));
    let engine = build_engine(config, chain, store.clone()).context("failed to build engine")?;
    Ok((snapshot, engine, store))
}

async fn score(config: &NodeConfig, args: ScoreArgs) -> Result<()> {
    let (snapshot, engine, store) = open(config, &args.input.snapshot)?;
    let ranked = engine.score_candidates(&snapshot.candidates).await;

    if args.input.json {
        println!("{}", serde_json::to_string_pretty(ranked.as_ref())?);
    } else {
        println!(
            "{:>4}  {:<24} {:>9} {:>9}  {}",
            "#", "NAME", "TOTAL", "AGG", "STASH"
        );
        for (i, entry) in ranked.iter().enumerate() {
            println!(
                "{:>4}  {:<24} {:>9.3} {:>9.3}  {}",
                i + 1,
                entry.name,
                entry.score.total,
                entry.score.aggregate,
                entry.stash
            );
        }
        println!();
        println!(
            "{} of {} candidates valid",
            ranked.len(),
            snapshot.candidates.len()
        );
    }

    if let Some(out) = args.out {
        store
            .export(&out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        info!(path = %out.display(), "score store exported");
    }
    Ok(())
}

async fn invalid(config: &NodeConfig, args: SnapshotArgs) -> Result<()> {
    let (snapshot, engine, _) = open(config, &args.snapshot)?;
    let invalid = engine.find_invalid_candidates(&snapshot.candidates).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(invalid.as_ref())?);
    } else {
        for reason in engine.invalid_candidates() {
            println!("{reason}");
        }
        println!();
        println!(
            "{} of {} candidates invalid",
            invalid.len(),
            snapshot.candidates.len()
        );
    }
    Ok(())
}

async fn partition(config: &NodeConfig, args: SnapshotArgs) -> Result<()> {
    let (snapshot, engine, _) = open(config, &args.snapshot)?;
    let result = engine
        .partition_nominated(&snapshot.nominated_cohort())
        .await
        .context("partition failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("=== ERA {} ===", result.era);
    println!("\nGood ({}):", result.good.len());
    for (stash, candidate) in &result.good {
        println!("  {:<24} {stash}", candidate.name);
    }
    println!("\nBad ({}):", result.bad.len());
    for (stash, bad) in &result.bad {
        println!("  {:<24} {stash}", bad.candidate.name);
        println!("    {}", bad.reason);
    }
    println!(
        "\nCommission ceiling: {:.2}%",
        perbill_to_percent(config.constraints.max_commission)
    );
    Ok(())
}
