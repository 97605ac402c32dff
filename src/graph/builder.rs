//! Graph arena and its builder.
//!
//! Nodes live in a `Vec` indexed by [`NodeId`]; connections reference nodes
//! only through [`ConnectorId`]s, so there are no ownership cycles between
//! nodes, connectors and connections. The builder enforces the data-model
//! invariants as the graph is assembled:
//!
//! - connections run from an output connector to an input connector
//! - every input connector has at most one incoming connection
//! - output indices are unique
//! - filter namespaces, functions and parameter names are script identifiers
//! - source paths are valid UTF-8
//!
//! Cycles are *not* rejected here; that is the validator's job.

use crate::graph::connection::Connection;
use crate::graph::error::{GraphError, GraphResult};
use crate::graph::id::{ConnectionId, ConnectorId, NodeId};
use crate::graph::node::{FilterNode, Node};
use crate::graph::port::ConnectorDirection;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// An immutable processing graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Graph {
    /// Rebuild a graph from raw parts, checking every structural invariant.
    pub fn from_parts(nodes: Vec<Node>, connections: Vec<Connection>) -> GraphResult<Self> {
        let mut builder = GraphBuilder::new();
        for node in nodes {
            builder.add_node(node)?;
        }
        for connection in connections {
            builder.connect_ports(connection.source, connection.target)?;
        }
        Ok(builder.build())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }

    /// The connection feeding `target`, if any.
    pub fn incoming(&self, target: ConnectorId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.target == target)
    }

    /// All connections leaving `source`.
    pub fn outgoing(&self, source: ConnectorId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.source == source)
    }
}

/// Incrementally assembles a [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    connected_inputs: HashSet<ConnectorId>,
    output_indices: HashMap<u32, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id. Ids are assigned in insertion order.
    pub fn add_node(&mut self, node: impl Into<Node>) -> GraphResult<NodeId> {
        let node = node.into();
        let next = self.nodes.len() as u64;
        if next > ConnectorId::MAX_NODE as u64 {
            return Err(GraphError::TooManyNodes(ConnectorId::MAX_NODE + 1));
        }
        let id = NodeId(next as u32);

        match &node {
            Node::Source(source) => {
                // Paths are emitted as string literals; no lossy conversion.
                if source.file_path.to_str().is_none() {
                    return Err(GraphError::InvalidPath { node: id });
                }
            }
            Node::Filter(filter) => check_filter_identifiers(id, filter)?,
            Node::Output(output) => {
                if let Some(&existing) = self.output_indices.get(&output.output_index) {
                    return Err(GraphError::DuplicateOutputIndex {
                        index: output.output_index,
                        existing,
                    });
                }
                self.output_indices.insert(output.output_index, id);
            }
        }

        self.nodes.push(node);
        Ok(id)
    }

    /// Connect the output connector of `from` to the input connector of `to`.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> GraphResult<ConnectionId> {
        let source = self
            .node(from)?
            .output_connector(from)
            .ok_or(GraphError::MissingConnector {
                node: from,
                direction: "output",
            })?;
        let target = self
            .node(to)?
            .input_connector(to)
            .ok_or(GraphError::MissingConnector {
                node: to,
                direction: "input",
            })?;
        self.connect_ports(source, target)
    }

    /// Connect two connectors directly.
    pub fn connect_ports(
        &mut self,
        source: ConnectorId,
        target: ConnectorId,
    ) -> GraphResult<ConnectionId> {
        let source_dir = self.direction_of(source)?;
        let target_dir = self.direction_of(target)?;

        if source_dir != ConnectorDirection::Output || target_dir != ConnectorDirection::Input {
            return Err(GraphError::DirectionMismatch {
                from: source,
                to: target,
            });
        }
        if !self.connected_inputs.insert(target) {
            return Err(GraphError::InputAlreadyConnected(target));
        }

        let id = ConnectionId(self.connections.len() as u32);
        self.connections.push(Connection::new(source, target));
        tracing::trace!("Connected {} -> {} as {:?}", source, target, id);
        Ok(id)
    }

    pub fn build(self) -> Graph {
        Graph {
            nodes: self.nodes,
            connections: self.connections,
        }
    }

    fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(id.index()).ok_or(GraphError::UnknownNode(id))
    }

    fn direction_of(&self, connector: ConnectorId) -> GraphResult<ConnectorDirection> {
        self.nodes
            .get(connector.node().index())
            .and_then(|node| node.connector_direction(connector.port_index()))
            .ok_or(GraphError::UnknownConnector(connector))
    }
}

fn check_filter_identifiers(id: NodeId, filter: &FilterNode) -> GraphResult<()> {
    let invalid = |role: &'static str, name: &str| GraphError::InvalidIdentifier {
        node: id,
        role,
        name: name.to_string(),
    };

    if !is_identifier(&filter.plugin_namespace) {
        return Err(invalid("plugin namespace", &filter.plugin_namespace));
    }
    if !is_identifier(&filter.function_name) {
        return Err(invalid("function name", &filter.function_name));
    }

    let mut seen = HashSet::new();
    for param in &filter.parameters {
        if !is_identifier(&param.name) {
            return Err(invalid("parameter name", &param.name));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(invalid("duplicate parameter name", &param.name));
        }
    }
    Ok(())
}

const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// ASCII identifier that is not a reserved word of the script language.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::{OutputNode, SourceNode};

    fn chain() -> (GraphBuilder, NodeId, NodeId, NodeId) {
        let mut builder = GraphBuilder::new();
        let src = builder.add_node(SourceNode::new("in.mp4")).unwrap();
        let crop = builder
            .add_node(FilterNode::new("Crop", "std", "Crop").param("left", 10))
            .unwrap();
        let out = builder.add_node(OutputNode::new(0)).unwrap();
        (builder, src, crop, out)
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let (_, src, crop, out) = chain();
        assert_eq!((src, crop, out), (NodeId(0), NodeId(1), NodeId(2)));
    }

    #[test]
    fn test_connect_resolves_connectors() {
        let (mut builder, src, crop, out) = chain();
        builder.connect(src, crop).unwrap();
        builder.connect(crop, out).unwrap();
        let graph = builder.build();

        assert_eq!(graph.connections().len(), 2);
        let into_out = graph
            .incoming(ConnectorId::new(out, 0))
            .expect("output is fed");
        assert_eq!(into_out.from_node(), crop);
        assert_eq!(into_out.source, ConnectorId::new(crop, 1));
    }

    #[test]
    fn test_fan_out_allowed() {
        let mut builder = GraphBuilder::new();
        let src = builder.add_node(SourceNode::new("in.mp4")).unwrap();
        let a = builder.add_node(OutputNode::new(0)).unwrap();
        let b = builder.add_node(OutputNode::new(1)).unwrap();
        builder.connect(src, a).unwrap();
        builder.connect(src, b).unwrap();
        let graph = builder.build();
        assert_eq!(graph.outgoing(ConnectorId::new(src, 0)).count(), 2);
    }

    #[test]
    fn test_fan_in_rejected() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node(SourceNode::new("a.mp4")).unwrap();
        let b = builder.add_node(SourceNode::new("b.mp4")).unwrap();
        let out = builder.add_node(OutputNode::new(0)).unwrap();
        builder.connect(a, out).unwrap();
        assert_eq!(
            builder.connect(b, out),
            Err(GraphError::InputAlreadyConnected(ConnectorId::new(out, 0)))
        );
    }

    #[test]
    fn test_missing_connectors() {
        let (mut builder, src, _, out) = chain();
        assert_eq!(
            builder.connect(out, src),
            Err(GraphError::MissingConnector {
                node: out,
                direction: "output"
            })
        );
        assert_eq!(
            builder.connect(NodeId(0), NodeId(0)),
            Err(GraphError::MissingConnector {
                node: src,
                direction: "input"
            })
        );
        assert_eq!(
            builder.connect(src, NodeId(9)),
            Err(GraphError::UnknownNode(NodeId(9)))
        );
    }

    #[test]
    fn test_connect_ports_checks_direction() {
        let (mut builder, src, crop, _) = chain();
        // Filter input -> Source output is backwards.
        let err = builder
            .connect_ports(ConnectorId::new(crop, 0), ConnectorId::new(src, 0))
            .unwrap_err();
        assert!(matches!(err, GraphError::DirectionMismatch { .. }));

        let err = builder
            .connect_ports(ConnectorId::new(src, 0), ConnectorId::new(crop, 7))
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownConnector(ConnectorId::new(crop, 7)));
    }

    #[test]
    fn test_self_loop_is_structurally_legal() {
        let mut builder = GraphBuilder::new();
        let f = builder
            .add_node(FilterNode::new("Loop", "std", "Invert"))
            .unwrap();
        assert!(builder.connect(f, f).is_ok());
    }

    #[test]
    fn test_duplicate_output_index() {
        let mut builder = GraphBuilder::new();
        let first = builder.add_node(OutputNode::new(3)).unwrap();
        assert_eq!(
            builder.add_node(OutputNode::new(3)),
            Err(GraphError::DuplicateOutputIndex {
                index: 3,
                existing: first
            })
        );
        assert!(builder.add_node(OutputNode::new(7)).is_ok());
    }

    #[test]
    fn test_filter_identifiers_checked() {
        let mut builder = GraphBuilder::new();
        let err = builder
            .add_node(FilterNode::new("Bad", "std.x", "Crop"))
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidIdentifier {
                role: "plugin namespace",
                ..
            }
        ));

        let err = builder
            .add_node(FilterNode::new("Bad", "std", "Crop").param("lambda", 1))
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidIdentifier {
                role: "parameter name",
                ..
            }
        ));

        let err = builder
            .add_node(
                FilterNode::new("Dup", "std", "Crop")
                    .param("left", 1)
                    .param("left", 2),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidIdentifier {
                role: "duplicate parameter name",
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_source_path_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut builder = GraphBuilder::new();
        builder.add_node(OutputNode::new(0)).unwrap();
        let path = OsStr::from_bytes(b"clip\xff.mkv");
        assert_eq!(
            builder.add_node(SourceNode::new(path)),
            Err(GraphError::InvalidPath { node: NodeId(1) })
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Crop"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2pass"));
        assert!(!is_identifier("left-edge"));
        assert!(!is_identifier("import"));
    }

    #[test]
    fn test_from_parts_replays_invariants() {
        let (mut builder, src, crop, out) = chain();
        builder.connect(src, crop).unwrap();
        builder.connect(crop, out).unwrap();
        let graph = builder.build();

        let rebuilt =
            Graph::from_parts(graph.nodes().to_vec(), graph.connections().to_vec()).unwrap();
        assert_eq!(rebuilt, graph);

        let mut doubled = graph.connections().to_vec();
        doubled.push(graph.connections()[1]);
        assert!(matches!(
            Graph::from_parts(graph.nodes().to_vec(), doubled),
            Err(GraphError::InputAlreadyConnected(_))
        ));
    }
}
