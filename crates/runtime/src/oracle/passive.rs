//! Passive tree allocation.
use game_core::{AllocationError, NodeId, PassiveTreeData, PassiveTreeOracle, PassiveTreeState};

/// Allocates start nodes freely and every other node only next to an
/// allocated one. Connections count in both directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveTreeOracleImpl;

impl PassiveTreeOracleImpl {
    fn is_connected(node: &NodeId, data: &PassiveTreeData, state: &PassiveTreeState) -> bool {
        let outgoing = data
            .node(node)
            .is_some_and(|n| n.connections.iter().any(|c| state.is_allocated(c)));
        outgoing
            || state.allocated.iter().any(|allocated| {
                data.node(allocated)
                    .is_some_and(|n| n.connections.contains(node))
            })
    }
}

impl PassiveTreeOracle for PassiveTreeOracleImpl {
    fn allocate_node(
        &self,
        node: &NodeId,
        data: &PassiveTreeData,
        state: &PassiveTreeState,
    ) -> Result<PassiveTreeState, AllocationError> {
        let target = data
            .node(node)
            .ok_or_else(|| AllocationError::UnknownNode(node.clone()))?;
        if state.is_allocated(node) {
            return Err(AllocationError::AlreadyAllocated(target.name.clone()));
        }
        if state.available_points == 0 {
            return Err(AllocationError::NoPoints);
        }
        if !target.is_start && !Self::is_connected(node, data, state) {
            return Err(AllocationError::NotConnected(target.name.clone()));
        }

        let mut next = state.clone();
        next.allocated.insert(node.clone());
        next.available_points -= 1;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::default_passive_tree;

    fn points(n: u32) -> PassiveTreeState {
        PassiveTreeState {
            available_points: n,
            ..PassiveTreeState::default()
        }
    }

    #[test]
    fn path_must_start_at_a_start_node() {
        let tree = default_passive_tree();
        let oracle = PassiveTreeOracleImpl;

        let err = oracle
            .allocate_node(&NodeId::from("might_1"), &tree, &points(3))
            .unwrap_err();
        assert!(matches!(err, AllocationError::NotConnected(_)));

        let state = oracle
            .allocate_node(&NodeId::from("origin"), &tree, &points(3))
            .unwrap();
        let state = oracle
            .allocate_node(&NodeId::from("might_1"), &tree, &state)
            .unwrap();
        assert_eq!(state.available_points, 1);
        assert_eq!(state.allocated.len(), 2);
    }

    #[test]
    fn points_and_duplicates_are_checked() {
        let tree = default_passive_tree();
        let oracle = PassiveTreeOracleImpl;
        let origin = NodeId::from("origin");

        assert_eq!(
            oracle.allocate_node(&origin, &tree, &points(0)),
            Err(AllocationError::NoPoints)
        );
        let state = oracle.allocate_node(&origin, &tree, &points(2)).unwrap();
        assert!(matches!(
            oracle.allocate_node(&origin, &tree, &state),
            Err(AllocationError::AlreadyAllocated(_))
        ));
        assert!(matches!(
            oracle.allocate_node(&NodeId::from("nowhere"), &tree, &state),
            Err(AllocationError::UnknownNode(_))
        ));
    }
}
