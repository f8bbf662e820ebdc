//! Subcommands.

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Subcommand;
use ringstore_core::{FileStore, RingSnapshot};

use crate::shell;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the node that owns each key.
    Locate {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show how synthetic keys and hash space spread over the nodes.
    Distribution {
        /// Number of synthetic keys to place.
        #[arg(short, long, default_value_t = 1000)]
        keys: usize,
    },
    /// Measure how many keys change owner when one node leaves or joins.
    Rebalance {
        #[arg(short, long, default_value_t = 1000)]
        keys: usize,
        /// Node to remove.
        #[arg(long, conflicts_with = "add")]
        remove: Option<String>,
        /// Node to add.
        #[arg(long)]
        add: Option<String>,
    },
    /// Print ring entries in token order.
    Ring,
    /// Interactive session reading commands from stdin.
    Shell,
}

/// Outcome of a subcommand.
pub type CommandResult = Result<()>;

pub fn execute(command: &Command, store: &FileStore) -> CommandResult {
    match command {
        Command::Shell => {
            let stdin = io::stdin();
            shell::run(store, stdin.lock(), io::stdout().lock())
        }
        other => execute_to(other, store, &mut io::stdout().lock()),
    }
}

/// Run a non-interactive subcommand, writing its report to `out`.
pub fn execute_to<W: Write>(command: &Command, store: &FileStore, out: &mut W) -> CommandResult {
    match command {
        Command::Locate { keys } => locate(store, keys, out),
        Command::Distribution { keys } => distribution(store, *keys, out),
        Command::Rebalance { keys, remove, add } => {
            rebalance(store, *keys, remove.as_deref(), add.as_deref(), out)
        }
        Command::Ring => ring(store, out),
        Command::Shell => bail!("shell needs an interactive input"),
    }
}

fn synthetic_keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key-{i}")).collect()
}

fn locate<W: Write>(store: &FileStore, keys: &[String], out: &mut W) -> Result<()> {
    for key in keys {
        writeln!(out, "{key}\t{}", store.locate(key)?)?;
    }
    Ok(())
}

fn distribution<W: Write>(store: &FileStore, keys: usize, out: &mut W) -> Result<()> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for key in synthetic_keys(keys) {
        *counts.entry(store.locate(&key)?).or_default() += 1;
    }

    writeln!(out, "node\tkeys\tshare\thash-space")?;
    for (id, space) in store.ring().ownership() {
        let count = counts.get(&id).copied().unwrap_or(0);
        let share = if keys == 0 { 0.0 } else { count as f64 / keys as f64 };
        writeln!(out, "{id}\t{count}\t{:.3}\t{space:.3}", share)?;
    }
    Ok(())
}

fn rebalance<W: Write>(
    store: &FileStore,
    keys: usize,
    remove: Option<&str>,
    add: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let before = store.ring().snapshot();
    match (remove, add) {
        (Some(id), None) => {
            store.remove_node(id)?;
        }
        (None, Some(id)) => {
            store.add_node(id)?;
        }
        _ => bail!("pass exactly one of --remove or --add"),
    }
    let after = store.ring().snapshot();

    let keys = synthetic_keys(keys);
    let movements = RingSnapshot::diff(&before, &after, &keys);
    let changed = remove.or(add);
    let between_survivors = movements
        .iter()
        .filter(|m| m.from.as_deref() != changed && m.to.as_deref() != changed)
        .count();

    let fraction = if keys.is_empty() {
        0.0
    } else {
        movements.len() as f64 / keys.len() as f64
    };
    writeln!(out, "keys\t{}", keys.len())?;
    writeln!(out, "moved\t{}\t{fraction:.3}", movements.len())?;
    writeln!(out, "between-survivors\t{between_survivors}")?;
    writeln!(out, "nodes\t{}", store.node_count())?;
    Ok(())
}

fn ring<W: Write>(store: &FileStore, out: &mut W) -> Result<()> {
    for vnode in store.ring().entries() {
        writeln!(out, "{}\t{}", vnode.token, vnode.node_id)?;
    }
    Ok(())
}
