use crate::error::{ErrorSeverity, GameError};
use crate::state::{NodeId, PassiveTreeData, PassiveTreeState};

/// Passive tree allocation algorithm.
pub trait PassiveTreeOracle: Send + Sync {
    /// Returns the tree state after allocating `node`.
    fn allocate_node(
        &self,
        node: &NodeId,
        data: &PassiveTreeData,
        state: &PassiveTreeState,
    ) -> Result<PassiveTreeState, AllocationError>;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("Passive node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("{0} is already allocated")]
    AlreadyAllocated(String),

    #[error("No passive points available")]
    NoPoints,

    #[error("{0} is not connected to an allocated node")]
    NotConnected(String),
}

impl GameError for AllocationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoPoints => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownNode(_) => "PASSIVE_UNKNOWN_NODE",
            Self::AlreadyAllocated(_) => "PASSIVE_ALREADY_ALLOCATED",
            Self::NoPoints => "PASSIVE_NO_POINTS",
            Self::NotConnected(_) => "PASSIVE_NOT_CONNECTED",
        }
    }
}
