//! villages-sql CLI - convert the census villages JSON into SQL seed data
//!
//! With no arguments this reads `Other Related Docs/DB/punjab_villages.json`
//! and writes `Database/init/03-villages-full.sql`, relative to the current
//! directory.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use villages_sql::config::DEFAULT_CONFIG_FILE;
use villages_sql::{CliOverrides, ConfigFile, Settings};

#[derive(Parser)]
#[command(name = "villages-sql")]
#[command(version, about = "Generate SQL seed data from a district/tehsil/village JSON extract", long_about = None)]
struct Cli {
    /// Input JSON document [default: Other Related Docs/DB/punjab_villages.json]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output SQL file, replaced atomically [default: Database/init/03-villages-full.sql]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Villages per multi-row INSERT [default: 100]
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Value for districts.state_name [default: Punjab]
    #[arg(short, long)]
    state: Option<String>,

    /// Settings file (optional when left at the default)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    init_tracing(cli.verbose);

    if let Err(e) = convert(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve settings, run the conversion and report counts
fn convert(cli: Cli) -> Result<(), villages_sql::SeedError> {
    let config_file = match cli.config {
        Some(path) => ConfigFile::load(path, true)?,
        None => ConfigFile::load(DEFAULT_CONFIG_FILE, false)?,
    };

    let overrides = CliOverrides {
        input: cli.input,
        output: cli.output,
        batch_size: cli.batch_size,
        state_name: cli.state,
    };
    let settings = Settings::resolve(overrides, config_file)?;

    println!("Reading: {}", settings.input.display());
    println!("Writing: {}", settings.output.display());

    let stats = villages_sql::run(&settings)?;

    println!("\n✅ Conversion complete!");
    println!("   Districts: {}", stats.districts);
    println!("   Tehsils: {}", stats.tehsils);
    println!("   Villages: {}", stats.villages);
    println!("\n   Output: {}", settings.output.display());

    Ok(())
}
