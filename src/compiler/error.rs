//! Compiler error types.

use crate::graph::{GraphError, NodeId};
use thiserror::Error;

/// Reasons a graph cannot be compiled. Compilation is all-or-nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Graph has no source node")]
    MissingSource,

    #[error("Graph has no output node")]
    MissingOutput,

    /// `nodes` lists the cycle in walk order, starting at the node where it closes.
    #[error("Cycle detected in graph through nodes {nodes:?}")]
    CycleDetected { nodes: Vec<NodeId> },

    #[error("Node {node:?} has an input with no incoming connection")]
    DanglingInput { node: NodeId },

    /// Raw node and connection slices that break the graph data model.
    /// Never produced for a graph assembled by `GraphBuilder`.
    #[error("Invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),
}

impl CompileError {
    /// Nodes a caller should highlight for this error.
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            CompileError::CycleDetected { nodes } => nodes,
            CompileError::DanglingInput { node } => std::slice::from_ref(node),
            CompileError::InvalidGraph(GraphError::InvalidPath { node }) => {
                std::slice::from_ref(node)
            }
            CompileError::MissingSource
            | CompileError::MissingOutput
            | CompileError::InvalidGraph(_) => &[],
        }
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
