//! `make-index` - regenerate the indicators index for the front-end.
//!
//! With no arguments, reads `ds/data/processed` and writes
//! `ui/static/indicators.json` relative to the current directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use indicators_core::{IndexConfig, build_index, generate_index};

#[derive(Parser, Debug)]
#[command(name = "make-index", version, about = "Aggregate dataset descriptors into one JSON index", long_about = None)]
struct Args {
    /// Root of the `<category>/<descriptor>.yaml` tree
    #[arg(long, default_value = indicators_core::config::DEFAULT_DATA_ROOT)]
    data_root: PathBuf,

    /// Output path of the JSON index
    #[arg(short, long, default_value = indicators_core::config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Base URL of the published data files
    #[arg(long, default_value = indicators_core::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Sort categories and descriptors by name instead of listing order
    #[arg(long, default_value_t = false)]
    sorted: bool,

    /// Print the index to stdout instead of writing it
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

impl Args {
    fn config(&self) -> IndexConfig {
        IndexConfig::default()
            .with_data_root(&self.data_root)
            .with_output_path(&self.output)
            .with_base_url(self.base_url.as_str())
            .with_sorted_entries(self.sorted)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; warnings show even without RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();

    if args.dry_run {
        let index = build_index(&config)
            .await
            .context("Failed to build index")?;
        println!("{}", index.to_json()?);
        return Ok(());
    }

    let report = generate_index(&config)
        .await
        .context("Failed to generate index")?;
    println!("Saved {}", report.output_path.display());
    println!("Done");

    Ok(())
}
