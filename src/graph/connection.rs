use crate::graph::id::{ConnectorId, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge from one node's output connector to another node's input connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub source: ConnectorId,
    pub target: ConnectorId,
}

impl Connection {
    pub fn new(source: ConnectorId, target: ConnectorId) -> Self {
        Self { source, target }
    }

    /// The upstream (producing) node.
    #[inline]
    pub fn from_node(&self) -> NodeId {
        self.source.node()
    }

    /// The downstream (consuming) node.
    #[inline]
    pub fn to_node(&self) -> NodeId {
        self.target.node()
    }
}
