//! Pok scorekeeper entry point.

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pok_cli::cli::Cli;
use pok_cli::config::Config;

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so stdout stays machine readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_data_dir(cli.data_dir.clone());
    let output = pok_cli::run(cli, &config)?;
    println!("{output}");

    Ok(())
}
