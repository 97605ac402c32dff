//! Test data builders for creating graphs

use vsgraph::graph::{FilterNode, OutputNode, SourceNode};
use vsgraph::{Graph, GraphBuilder, NodeId};

/// Thin wrapper over `GraphBuilder` that panics on structural errors.
#[derive(Default)]
pub struct GraphFixture {
    builder: GraphBuilder,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&mut self, path: &str) -> NodeId {
        self.builder.add_node(SourceNode::new(path)).unwrap()
    }

    pub fn source_with_hint(&mut self, path: &str, hint: &str) -> NodeId {
        self.builder
            .add_node(SourceNode::new(path).with_hint(hint))
            .unwrap()
    }

    /// A `std.<function>` filter with no parameters.
    pub fn std_filter(&mut self, function: &str) -> NodeId {
        self.filter(FilterNode::new(function, "std", function))
    }

    pub fn filter(&mut self, filter: FilterNode) -> NodeId {
        self.builder.add_node(filter).unwrap()
    }

    pub fn output(&mut self, index: u32) -> NodeId {
        self.builder.add_node(OutputNode::new(index)).unwrap()
    }

    pub fn link(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        self.builder.connect(from, to).unwrap();
        self
    }

    pub fn build(self) -> Graph {
        self.builder.build()
    }
}

/// Source -> `functions[0]` -> ... -> Output(0), all `std` filters.
pub fn chain(functions: &[&str]) -> Graph {
    let mut g = GraphFixture::new();
    let mut prev = g.source("in.mp4");
    for function in functions {
        let next = g.std_filter(function);
        g.link(prev, next);
        prev = next;
    }
    let out = g.output(0);
    g.link(prev, out);
    g.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_builder() {
        let graph = chain(&["Invert", "FlipVertical"]);
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.connections().len(), 3);
    }
}
