//! CLI entry point for ringstore.

use clap::Parser;
use ringstore_cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.run()
}
