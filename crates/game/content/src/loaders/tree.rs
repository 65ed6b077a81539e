//! Passive tree loader.
use std::path::Path;

use anyhow::bail;
use game_core::{PassiveNode, PassiveTreeData};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Passive tree structure for RON files.
///
/// ```ron
/// (
///     nodes: [
///         (id: "origin", name: "Origin", is_start: true, connections: ["brawn"]),
///         (id: "brawn", name: "Brawn", stats: (strength: 5.0), connections: ["origin"]),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassiveTreeFile {
    pub nodes: Vec<PassiveNode>,
}

pub struct PassiveTreeLoader;

impl PassiveTreeLoader {
    /// Loads a tree and rejects dangling connections.
    pub fn load(path: &Path) -> LoadResult<PassiveTreeData> {
        let content = read_file(path)?;
        let file: PassiveTreeFile = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse passive tree RON: {}", e))?;

        let tree = PassiveTreeData::from_nodes(file.nodes);
        for node in tree.nodes.values() {
            if let Some(missing) = node.connections.iter().find(|c| tree.node(c).is_none()) {
                bail!("Passive node {} connects to unknown node {}", node.id, missing);
            }
        }
        if !tree.is_empty() && !tree.nodes.values().any(|node| node.is_start) {
            bail!("Passive tree at {} has no start node", path.display());
        }
        Ok(tree)
    }
}
