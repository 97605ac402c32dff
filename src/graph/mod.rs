//! Graph model for the node editor.
//!
//! A graph is a set of nodes and a set of connections between their
//! connectors. Data flows from a Source through Filters into Outputs:
//!
//! ```text
//! [Source] ──► [Filter] ──► [Filter] ──► [Output 0]
//!                      └──────────────► [Output 1]
//! ```
//!
//! # Design
//!
//! - **Arena + indices**: nodes are stored in a `Vec`, addressed by `NodeId`.
//! - **Packed connector ids**: a `ConnectorId` encodes its owning node.
//! - **Closed node set**: `Node` is an enum; there is no plugin escape hatch.
//! - **Checked on build**: `GraphBuilder` rejects structurally invalid edges.

pub mod builder;
pub mod connection;
pub mod error;
pub mod id;
pub mod node;
pub mod port;
pub mod value;

pub use builder::{Graph, GraphBuilder};
pub use connection::Connection;
pub use error::{GraphError, GraphResult};
pub use id::{ConnectionId, ConnectorId, NodeId};
pub use node::{FilterNode, Node, NodeKind, OutputNode, Parameter, SourceNode};
pub use port::{ConnectorDescriptor, ConnectorDirection};
pub use value::ParamValue;
