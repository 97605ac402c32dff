//! Deterministic topological ordering of the emitted nodes.

use crate::compiler::validate::forward_adjacency;
use crate::graph::{Connection, Node, NodeId};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Order the emitted nodes so every producer precedes its consumers.
///
/// Only nodes that take part in at least one connection are emitted, plus
/// every Output node (an unfed output must surface as an error later rather
/// than disappear). Among nodes with no ordering constraint, the one inserted
/// first wins, so an unchanged graph always sorts the same way.
///
/// Assumes the graph passed validation. On a cyclic graph the nodes on or
/// behind the cycle are left out of the result.
pub fn sort(nodes: &[Node], connections: &[Connection]) -> Vec<NodeId> {
    let n = nodes.len();
    let emitted = emission_set(nodes, connections);
    let adj = forward_adjacency(n, connections);

    let mut in_degree = vec![0u32; n];
    for targets in &adj {
        for &to in targets {
            in_degree[to] += 1;
        }
    }

    // Kahn's algorithm with a min-heap on node index
    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&i| emitted[i] && in_degree[i] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(n);

    while let Some(Reverse(node)) = ready.pop() {
        order.push(NodeId(node as u32));
        for &next in &adj[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    let expected = emitted.iter().filter(|&&e| e).count();
    if order.len() != expected {
        tracing::warn!(
            "Graph has a cycle! Only {} of {} nodes ordered.",
            order.len(),
            expected
        );
    }

    order
}

/// Which nodes get a statement in the script.
pub(crate) fn emission_set(nodes: &[Node], connections: &[Connection]) -> Vec<bool> {
    let n = nodes.len();
    let mut emitted: Vec<bool> = nodes
        .iter()
        .map(|node| matches!(node, Node::Output(_)))
        .collect();

    for connection in connections {
        let from = connection.from_node().index();
        let to = connection.to_node().index();
        if from < n && to < n {
            emitted[from] = true;
            emitted[to] = true;
        }
    }

    emitted
}
