//! Command-line configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ringstore_core::{DigestKind, FileStore, RingConfig};

use crate::commands::{self, Command};

#[derive(Parser, Debug)]
#[command(
    name = "ringstore",
    version,
    about = "Inspect and exercise a consistent-hashing file store"
)]
pub struct CliConfig {
    /// JSON ring configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Comma-separated node ids; replaces the nodes listed in the config file.
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub nodes: Vec<String>,

    /// Virtual nodes per physical node.
    #[arg(long, global = true)]
    pub vnodes: Option<usize>,

    /// Digest used to place keys and virtual nodes (blake3, xxh3, sip).
    #[arg(long, global = true)]
    pub digest: Option<DigestKind>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Merge the config file (if any) with command-line overrides.
    pub fn ring_config(&self) -> Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => RingConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RingConfig::default(),
        };
        if !self.nodes.is_empty() {
            config.nodes = self.nodes.clone();
        }
        if let Some(vnodes) = self.vnodes {
            config.virtual_nodes = vnodes;
        }
        if let Some(digest) = self.digest {
            config.digest = digest;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn run(self) -> Result<()> {
        setup_tracing(&self.log_level);
        let config = self.ring_config()?;
        let store = FileStore::from_config(&config).context("building ring")?;
        tracing::debug!(
            nodes = config.nodes.len(),
            virtual_nodes = config.virtual_nodes,
            digest = %config.digest,
            "ring ready"
        );
        commands::execute(&self.command, &store)
    }
}

/// Respects `RUST_LOG` if set, otherwise uses `level`.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second initialisation (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
