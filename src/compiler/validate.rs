//! Graph validation: required node kinds and cycle detection.

use crate::compiler::error::{CompileError, CompileResult};
use crate::graph::{Connection, Node, NodeId};

/// Check that a graph can be sorted and emitted.
///
/// Checks run in a fixed order so a graph with several problems always
/// reports the same one: `MissingSource`, then `MissingOutput`, then
/// `CycleDetected`. The cycle walk covers every connection, not just the
/// part of the graph reachable from a source.
pub fn validate(nodes: &[Node], connections: &[Connection]) -> CompileResult<()> {
    if !nodes.iter().any(|n| matches!(n, Node::Source(_))) {
        return Err(CompileError::MissingSource);
    }
    if !nodes.iter().any(|n| matches!(n, Node::Output(_))) {
        return Err(CompileError::MissingOutput);
    }
    if let Some(cycle) = find_cycle(nodes.len(), connections) {
        return Err(CompileError::CycleDetected { nodes: cycle });
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first walk with three-color marking. Returns the first cycle found,
/// starting roots in node order so the reported cycle is deterministic.
pub(crate) fn find_cycle(n: usize, connections: &[Connection]) -> Option<Vec<NodeId>> {
    let adj = forward_adjacency(n, connections);
    let mut marks = vec![Mark::Unvisited; n];
    // (node, index of the next child to visit)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        stack.push((root, 0));

        while let Some((node, next_child)) = stack.last_mut() {
            let node = *node;
            if let Some(&child) = adj[node].get(*next_child) {
                *next_child += 1;
                match marks[child] {
                    Mark::Unvisited => {
                        marks[child] = Mark::InProgress;
                        stack.push((child, 0));
                    }
                    Mark::InProgress => {
                        let start = stack
                            .iter()
                            .position(|&(on_path, _)| on_path == child)
                            .unwrap_or(0);
                        return Some(
                            stack[start..]
                                .iter()
                                .map(|&(on_path, _)| NodeId(on_path as u32))
                                .collect(),
                        );
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }

    None
}

/// Forward adjacency lists, skipping connections to nodes outside `0..n`.
pub(crate) fn forward_adjacency(n: usize, connections: &[Connection]) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); n];
    for connection in connections {
        let from = connection.from_node().index();
        let to = connection.to_node().index();
        if from < n && to < n {
            adj[from].push(to);
        }
    }
    adj
}
