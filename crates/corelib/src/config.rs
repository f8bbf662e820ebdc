//! Ring configuration.
//!
//! Configuration is a small JSON document; every field is optional:
//!
//! ```json
//! { "virtual_nodes": 3, "digest": "blake3", "nodes": ["A", "B", "C"] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::partitioner::DigestKind;
use crate::ring::DEFAULT_VIRTUAL_NODES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    /// Ring entries per physical node.
    pub virtual_nodes: usize,
    /// Digest used for both keys and virtual nodes.
    pub digest: DigestKind,
    /// Members added at startup, in order.
    pub nodes: Vec<String>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            virtual_nodes: DEFAULT_VIRTUAL_NODES,
            digest: DigestKind::default(),
            nodes: Vec::new(),
        }
    }
}

impl RingConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.virtual_nodes == 0 {
            return Err(Error::InvalidArgument(
                "virtual_nodes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
