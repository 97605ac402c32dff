//! Graph-to-script compiler.
//!
//! Three phases, each usable on its own:
//!
//! ```text
//! validate(nodes, connections) ──► sort(nodes, connections) ──► emit(order, ...)
//!   MissingSource / MissingOutput     deterministic topo order     DanglingInput
//!   CycleDetected
//! ```
//!
//! The compiler is a pure function of its input: no I/O, no state kept
//! between calls.

pub mod adapter;
pub mod emit;
pub mod error;
pub mod script;
pub mod sort;
pub mod validate;

pub use adapter::{select_adapter, SourceAdapter, DEFAULT_ADAPTER, SOURCE_ADAPTERS};
pub use emit::{emit, CORE_LINE, IMPORT_LINE};
pub use error::{CompileError, CompileResult};
pub use script::{Script, ScriptStats};
pub use sort::sort;
pub use validate::validate;

use crate::graph::{Connection, Graph, Node};

/// Compiles a graph into a script.
pub struct ScriptCompiler;

impl ScriptCompiler {
    /// Validate, sort and emit a graph.
    pub fn compile(graph: &Graph) -> CompileResult<Script> {
        Self::compile_checked(graph.nodes(), graph.connections())
    }

    /// Compile from raw node and connection slices.
    ///
    /// The slices are validated first, then replayed through
    /// [`Graph::from_parts`]; any broken data-model invariant (fan-in above
    /// one, too many nodes, bad identifiers) fails as `InvalidGraph`.
    pub fn compile_parts(nodes: &[Node], connections: &[Connection]) -> CompileResult<Script> {
        validate(nodes, connections)?;
        let graph = Graph::from_parts(nodes.to_vec(), connections.to_vec())?;
        Self::compile_checked(graph.nodes(), graph.connections())
    }

    fn compile_checked(nodes: &[Node], connections: &[Connection]) -> CompileResult<Script> {
        let start_time = std::time::Instant::now();

        validate(nodes, connections)?;
        tracing::debug!(
            "Validated graph: {} nodes, {} connections",
            nodes.len(),
            connections.len()
        );

        let order = sort(nodes, connections);
        let emitted = sort::emission_set(nodes, connections);
        for (idx, node) in nodes.iter().enumerate() {
            if !emitted[idx] {
                tracing::warn!(
                    "Node '{}' (idx {}) is not connected and will not be emitted",
                    node.label(),
                    idx
                );
            }
        }

        let text = emit(&order, nodes, connections)?;

        let filter_count = order
            .iter()
            .filter(|id| matches!(nodes.get(id.index()), Some(Node::Filter(_))))
            .count();
        let output_count = order
            .iter()
            .filter(|id| matches!(nodes.get(id.index()), Some(Node::Output(_))))
            .count();

        let stats = ScriptStats {
            total_nodes: nodes.len(),
            emitted_nodes: order.len(),
            omitted_nodes: nodes.len().saturating_sub(order.len()),
            filter_count,
            output_count,
            compile_time_us: start_time.elapsed().as_micros() as u64,
        };

        tracing::info!(
            "Graph compiled: {} emitted / {} total, {} filters, {} outputs ({} us)",
            stats.emitted_nodes,
            stats.total_nodes,
            stats.filter_count,
            stats.output_count,
            stats.compile_time_us,
        );

        Ok(Script { text, stats })
    }
}

/// Compile a graph into a script. Shorthand for [`ScriptCompiler::compile`].
pub fn compile(graph: &Graph) -> CompileResult<Script> {
    ScriptCompiler::compile(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        ConnectorId, FilterNode, GraphBuilder, GraphError, NodeId, OutputNode, SourceNode,
    };

    #[test]
    fn test_compile_stats() {
        let mut b = GraphBuilder::new();
        let src = b.add_node(SourceNode::new("in.mp4")).unwrap();
        let crop = b
            .add_node(FilterNode::new("Crop", "std", "Crop").param("left", 10))
            .unwrap();
        let _orphan = b.add_node(FilterNode::new("Unused", "std", "Invert")).unwrap();
        let out = b.add_node(OutputNode::new(0)).unwrap();
        b.connect(src, crop).unwrap();
        b.connect(crop, out).unwrap();

        let script = compile(&b.build()).unwrap();
        assert_eq!(script.stats.total_nodes, 4);
        assert_eq!(script.stats.emitted_nodes, 3);
        assert_eq!(script.stats.omitted_nodes, 1);
        assert_eq!(script.stats.filter_count, 1);
        assert_eq!(script.stats.output_count, 1);
        assert_eq!(script.line_count(), 5);
        assert!(!script.text.contains("Invert"));
        assert_eq!(script.to_string(), script.text);
    }

    #[test]
    fn test_raw_parts_past_node_limit() {
        let last = ConnectorId::MAX_NODE as usize + 1;
        let mut nodes: Vec<Node> = vec![SourceNode::new("filler.mp4").into(); last + 1];
        nodes[0] = SourceNode::new("in.mp4").into();
        nodes[1] = OutputNode::new(0).into();
        nodes[last] = OutputNode::new(1).into();
        let connections = [Connection::new(
            ConnectorId::new(NodeId(0), 0),
            ConnectorId::new(NodeId(1), 0),
        )];

        assert_eq!(
            ScriptCompiler::compile_parts(&nodes, &connections).unwrap_err(),
            CompileError::InvalidGraph(GraphError::TooManyNodes(ConnectorId::MAX_NODE + 1))
        );
    }

    #[test]
    fn test_validation_runs_before_emission() {
        // No source and a dangling output: the structural error wins.
        let mut b = GraphBuilder::new();
        b.add_node(OutputNode::new(0)).unwrap();
        assert_eq!(
            compile(&b.build()).unwrap_err(),
            CompileError::MissingSource
        );
    }
}
