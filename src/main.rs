//! kyc-smoke - smoke tests for a KYC review backend
//!
//! `workflow` drives registration, document submission and the admin
//! approve/reject cycle end-to-end; `probe` discovers which candidate
//! paths serve JSON.

use std::path::PathBuf;

use clap::Parser;
use kyc_smoke::commands::Commands;
use kyc_smoke::common::config::Config;
use kyc_smoke::common::logging;
use kyc_smoke::{cli, Result};

#[derive(Parser)]
#[command(name = "kyc-smoke", about = "Smoke tests for a KYC review backend")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir, kyc-smoke/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every request to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let result = match load_config(cli.config.as_ref()) {
        Ok(config) => cli::dispatch(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
