use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::common::{NodeId, StatBlock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassiveNode {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub connections: Vec<NodeId>,
    /// Start nodes may be allocated without an allocated neighbour.
    #[serde(default)]
    pub is_start: bool,
}

/// Static shape of the passive tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassiveTreeData {
    pub nodes: BTreeMap<NodeId, PassiveNode>,
}

impl PassiveTreeData {
    pub fn from_nodes(nodes: impl IntoIterator<Item = PassiveNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&PassiveNode> {
        self.nodes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The player's allocation progress in the passive tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassiveTreeState {
    pub allocated: BTreeSet<NodeId>,
    pub available_points: u32,
}

impl PassiveTreeState {
    pub fn is_allocated(&self, id: &NodeId) -> bool {
        self.allocated.contains(id)
    }

    /// Sum of stats from allocated nodes present in `data`.
    pub fn total_stats(&self, data: &PassiveTreeData) -> StatBlock {
        self.allocated
            .iter()
            .filter_map(|id| data.node(id))
            .map(|node| &node.stats)
            .sum()
    }
}
