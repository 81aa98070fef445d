//! Restoreview CLI - inspect and seed the restaurant review store

use clap::{Parser, Subcommand, Args};
use std::path::PathBuf;
use restoreview::config;
use restoreview::seed::PriceSource;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "restoreview")]
#[command(version)]
#[command(about = "Restaurant review store - restaurants, customers and star-rated reviews on SQLite")]
#[command(long_about = r#"
Restoreview keeps restaurants, customers and their reviews in one SQLite file.

Example usage:
  restoreview demo --seed 7
  restoreview fanciest
  restoreview customer 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct SeedArgs {
    /// Seed for random restaurant prices
    #[arg(long)]
    seed: Option<u64>,

    /// Give every restaurant this price instead of a random one
    #[arg(long)]
    price: Option<i64>,

    /// Delete existing rows before seeding
    #[arg(long)]
    reset: bool,
}

impl SeedArgs {
    fn price_source(&self) -> PriceSource {
        self.price.map(PriceSource::Fixed).unwrap_or(PriceSource::Random)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema if it does not exist
    Init,

    /// Write the sample restaurants, customers and reviews
    Seed(SeedArgs),

    /// Seed sample data, then run every entity operation once
    Demo(SeedArgs),

    /// Show row counts
    Stats,

    /// Show the most expensive restaurant
    Fanciest,

    /// Show a restaurant with its reviews and reviewers
    Restaurant {
        /// Restaurant id
        id: i64,
    },

    /// Show a customer with their reviews and favorite restaurant
    Customer {
        /// Customer id
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Print a JSON envelope for `command` in JSON mode; human output is printed by the caller
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    let loaded = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database(cli.database, loaded.as_ref());
    config::ensure_db_dir(&database)?;
    tracing::debug!("Using database {}", database.display());

    match cli.command {
        Commands::Init => commands::run_init(&database, output_mode),
        Commands::Seed(args) => commands::run_seed(&database, args.price_source(), args.seed, args.reset, output_mode),
        Commands::Demo(args) => commands::run_demo(&database, args.price_source(), args.seed, args.reset, output_mode),
        Commands::Stats => commands::run_stats(&database, output_mode),
        Commands::Fanciest => commands::run_fanciest(&database, output_mode),
        Commands::Restaurant { id } => commands::run_restaurant(&database, id, output_mode),
        Commands::Customer { id } => commands::run_customer(&database, id, output_mode),
    }
}
