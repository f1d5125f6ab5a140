//! Kindred CLI - query a similarity artifact from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Top-5 titles similar to an exact title
//! kd recommend "The Dark Knight"
//! kd recommend "Inception" -k 10 --json
//!
//! # Case-insensitive substring search
//! kd search "dark" -n 20
//!
//! # Catalog listing and readiness
//! kd list -n 100
//! kd health
//! ```
//!
//! The artifact location comes from `--artifact`, `$KINDRED_ARTIFACT`, or
//! the standard data directories; see the `config` module.

mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kindred_core::config::{DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, DEFAULT_TOP_K};
use kindred_core::engine::RecommendEngine;
use kindred_core::error::QueryError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit code for "title not found" (distinct from unavailable).
const EXIT_NOT_FOUND: u8 = 1;

/// Exit code for "engine not ready" (artifact failed to load).
const EXIT_UNAVAILABLE: u8 = 2;

/// Kindred recommendation CLI.
///
/// Queries a precomputed item-item similarity artifact: exact-title
/// recommendations, substring search, catalog listing, and health.
#[derive(Parser)]
#[command(name = "kd", version, about)]
struct Cli {
    /// Path to the similarity artifact (overrides $KINDRED_ARTIFACT)
    #[arg(long, global = true)]
    artifact: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend titles similar to an exact, case-sensitive title
    Recommend {
        /// Title to query, exactly as it appears in the catalog
        title: String,

        /// Number of recommendations to return
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,
    },
    /// Search titles by case-insensitive substring
    Search {
        /// Substring to match against every title
        query: String,

        /// Maximum number of matches to return
        #[arg(short = 'n', long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// List titles in catalog order
    List {
        /// Maximum number of titles to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,
    },
    /// Show engine readiness and catalog size
    Health,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let artifact = config::artifact_path(cli.artifact.as_ref())?;
    info!("Loading artifact: {}", artifact.display());
    let engine = RecommendEngine::from_path(&artifact);
    info!(
        "Engine ready: {} ({} titles)",
        engine.is_ready(),
        engine.item_count()
    );

    let code = match cli.command {
        Command::Recommend { title, k } => match engine.recommend(&title, k) {
            Ok(titles) => {
                println!(
                    "{}",
                    if cli.json {
                        output::recommend_json(&title, &titles)
                    } else {
                        output::recommend_human(&title, &titles)
                    }
                );
                ExitCode::SUCCESS
            }
            Err(QueryError::NotFound) => {
                eprintln!("Title not found in catalog: \"{}\"", title);
                ExitCode::from(EXIT_NOT_FOUND)
            }
            Err(err @ QueryError::Unavailable(_)) => {
                eprintln!("{}", err);
                ExitCode::from(EXIT_UNAVAILABLE)
            }
        },
        Command::Search { query, limit } => match engine.search(&query, limit) {
            Ok(titles) => {
                println!(
                    "{}",
                    if cli.json {
                        output::search_json(&query, &titles)
                    } else {
                        output::search_human(&query, &titles)
                    }
                );
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::from(EXIT_UNAVAILABLE)
            }
        },
        Command::List { limit } => match engine.list_items(limit) {
            Ok(listing) => {
                println!(
                    "{}",
                    if cli.json {
                        output::list_json(&listing)
                    } else {
                        output::list_human(&listing)
                    }
                );
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::from(EXIT_UNAVAILABLE)
            }
        },
        Command::Health => {
            // Health never fails; it reports not-ready as data
            let health = engine.health();
            println!(
                "{}",
                if cli.json {
                    output::health_json(&health)
                } else {
                    output::health_human(&health)
                }
            );
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
