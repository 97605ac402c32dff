//! Identity types for the graph model.
//!
//! Node and connection ids are newtypes over `u32` that double as indices into
//! the graph's storage vectors. Connector ids pack the owning node into the
//! high bits, so a connector always knows which node it belongs to without
//! holding a reference to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into `Graph::nodes`. Also the node's insertion order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compact connector identifier. High 20 bits = node index, low 12 bits = port index.
/// Supports up to ~1M nodes with 4096 connectors each.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(pub u32);

impl ConnectorId {
    const PORT_BITS: u32 = 12;
    const PORT_MASK: u32 = (1 << Self::PORT_BITS) - 1;

    /// Largest node index a connector id can address.
    pub const MAX_NODE: u32 = (1 << (32 - Self::PORT_BITS)) - 1;

    pub fn new(node: NodeId, port_index: u16) -> Self {
        debug_assert!(node.0 <= Self::MAX_NODE);
        debug_assert!(port_index < (1 << Self::PORT_BITS) as u16);
        Self((node.0 << Self::PORT_BITS) | (port_index as u32 & Self::PORT_MASK))
    }

    /// Like [`ConnectorId::new`], but `None` when the node or port is out of range.
    pub fn try_new(node: NodeId, port_index: u16) -> Option<Self> {
        if node.0 > Self::MAX_NODE || port_index as u32 > Self::PORT_MASK {
            return None;
        }
        Some(Self::new(node, port_index))
    }

    /// The node owning this connector.
    #[inline]
    pub fn node(self) -> NodeId {
        NodeId(self.0 >> Self::PORT_BITS)
    }

    #[inline]
    pub fn port_index(self) -> u16 {
        (self.0 & Self::PORT_MASK) as u16
    }
}

impl fmt::Debug for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConnectorId(node={}, port={})",
            self.node().0,
            self.port_index()
        )
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node().0, self.port_index())
    }
}

/// Index into `Graph::connections`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u32);

impl ConnectionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}
