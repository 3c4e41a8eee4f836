//! Create (or verify) the clinic records schema at a storage location.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vetrecords_core::{Database, StoreConfig};

#[derive(Parser)]
#[command(name = "vetrecords-init")]
#[command(about = "Initialize the veterinary clinic records database")]
struct Args {
    /// Database file to create or verify
    #[arg(conflicts_with = "config")]
    path: Option<PathBuf>,

    /// TOML store configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "vetrecords_core=debug,info"
    } else {
        "vetrecords_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = match (&args.config, args.path) {
        (Some(file), _) => StoreConfig::from_file(file)
            .with_context(|| format!("loading {}", file.display()))?,
        (None, Some(path)) => StoreConfig::at(path),
        (None, None) => StoreConfig::default(),
    };

    let db = Database::from_config(&config)
        .with_context(|| format!("initializing {}", config.path.display()))?;
    let tables = db.table_names()?;

    println!(
        "Database initialized at {} ({} tables)",
        config.path.display(),
        tables.len()
    );
    Ok(())
}
