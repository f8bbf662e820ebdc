//! Line-oriented interactive session over a [`FileStore`].

use std::io::{BufRead, Write};

use anyhow::Result;
use ringstore_core::FileStore;

const HELP: &str = "\
commands:
  add ID            add a node
  remove ID         remove a node (its files are lost)
  put NAME CONTENT  store a file
  get NAME          print a file
  has NAME          check whether a file exists
  del NAME          remove a file
  locate NAME       print the node owning NAME
  nodes             list nodes
  count             number of nodes
  ring              print ring entries
  quit              leave";

/// Read commands from `input` until EOF or `quit`.
pub fn run<R: BufRead, W: Write>(store: &FileStore, input: R, mut out: W) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match execute_line(store, line) {
            Reply::Quit => break,
            Reply::Text(text) => writeln!(out, "{text}")?,
        }
        out.flush()?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Text(String),
    Quit,
}

fn execute_line(store: &FileStore, line: &str) -> Reply {
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let arg = rest.split_whitespace().next();

    let result: ringstore_core::Result<String> = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("quit" | "exit", _) => return Reply::Quit,
        ("help", _) => Ok(HELP.to_owned()),
        ("add", Some(id)) => store.add_node(id).map(|n| format!("added {}", n.id())),
        ("remove", Some(id)) => store
            .remove_node(id)
            .map(|n| format!("removed {} ({} files dropped)", n.id(), n.len())),
        ("put", Some(name)) => {
            let content = rest[name.len()..].trim_start();
            store.store_file(name, content).map(|_| "OK".to_owned())
        }
        ("get", Some(name)) => store
            .retrieve_file(name)
            .map(|content| content.unwrap_or_else(|| "(nil)".to_owned())),
        ("has", Some(name)) => store.contains_file(name).map(|found| found.to_string()),
        ("del", Some(name)) => store.remove_file(name).map(|_| "OK".to_owned()),
        ("locate", Some(name)) => store.locate(name),
        ("nodes", _) => {
            let mut nodes: Vec<String> = store.list_nodes().iter().map(|n| n.to_string()).collect();
            nodes.sort();
            Ok(nodes.join("\n"))
        }
        ("count", _) => Ok(store.node_count().to_string()),
        ("ring", _) => Ok(store
            .ring()
            .entries()
            .iter()
            .map(|v| format!("{}\t{}", v.token, v.node_id))
            .collect::<Vec<_>>()
            .join("\n")),
        _ => return Reply::Text(format!("unknown command: {line} (try `help`)")),
    };

    Reply::Text(result.unwrap_or_else(|e| format!("error: {e}")))
}
