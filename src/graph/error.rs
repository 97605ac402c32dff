//! Errors raised while assembling a graph.

use crate::graph::id::{ConnectorId, NodeId};
use thiserror::Error;

/// Structural violations of the graph data model.
///
/// These are caught when nodes and connections are added, so a built
/// [`Graph`](crate::graph::Graph) always satisfies them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Unknown connector: {0:?}")]
    UnknownConnector(ConnectorId),

    #[error("Connection {from:?} -> {to:?} must run from an output connector to an input connector")]
    DirectionMismatch { from: ConnectorId, to: ConnectorId },

    #[error("Node {node:?} has no {direction} connector")]
    MissingConnector {
        node: NodeId,
        direction: &'static str,
    },

    #[error("Input connector {0:?} is already connected")]
    InputAlreadyConnected(ConnectorId),

    #[error("Output index {index} is already bound to node {existing:?}")]
    DuplicateOutputIndex { index: u32, existing: NodeId },

    #[error("Node {node:?}: invalid identifier '{name}' for {role}")]
    InvalidIdentifier {
        node: NodeId,
        role: &'static str,
        name: String,
    },

    #[error("Node {node:?}: source path is not valid UTF-8")]
    InvalidPath { node: NodeId },

    #[error("Graph cannot hold more than {0} nodes")]
    TooManyNodes(u32),
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
