//! Logofill CLI: fill missing company logos in a tabular base.
//!
//! Reads company names from a table, resolves logo URLs through a chain
//! of providers, and writes them back in paced batches.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
