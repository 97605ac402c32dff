//! Script emission.
//!
//! Output layout, one statement per line:
//!
//! ```text
//! import vapoursynth as vs
//! core = vs.core
//! src_0 = core.lsmas.LWLibavSource(source="in.mp4")
//! fx_1_1 = core.std.Crop(src_0, left=10)
//! fx_1_1.set_output(0)
//! ```
//!
//! Source and Filter statements come first in topological order, then one
//! `set_output` per Output node, also in topological order. Variable names
//! derive from node ids and sort positions only, so re-compiling an unchanged
//! graph yields the same text.

use crate::compiler::adapter::select_adapter;
use crate::compiler::error::{CompileError, CompileResult};
use crate::graph::value::write_string_literal;
use crate::graph::{Connection, ConnectorId, FilterNode, GraphError, Node, NodeId};
use std::collections::HashMap;
use std::fmt::Write;

pub const IMPORT_LINE: &str = "import vapoursynth as vs";
pub const CORE_LINE: &str = "core = vs.core";

/// Emit the script for nodes already in topological order.
///
/// Fails with `DanglingInput` if an id in `order` names no node, if a Filter
/// or Output has no connection into its input, or if its producer has not
/// been emitted before it. Fails with `InvalidGraph` if two connections feed
/// the same input or a source path is not UTF-8.
pub fn emit(order: &[NodeId], nodes: &[Node], connections: &[Connection]) -> CompileResult<String> {
    let mut feeds: HashMap<ConnectorId, ConnectorId> = HashMap::with_capacity(connections.len());
    for connection in connections {
        if feeds.insert(connection.target, connection.source).is_some() {
            return Err(GraphError::InputAlreadyConnected(connection.target).into());
        }
    }

    let mut vars: HashMap<NodeId, String> = HashMap::with_capacity(order.len());
    let mut body = Vec::with_capacity(order.len());
    let mut outputs = Vec::new();

    for (position, &id) in order.iter().enumerate() {
        let node = nodes
            .get(id.index())
            .ok_or(CompileError::DanglingInput { node: id })?;

        match node {
            Node::Source(source) => {
                let var = format!("src_{}", id.0);
                let adapter = select_adapter(source.source_plugin_hint.as_deref());
                tracing::debug!("Source {:?} uses adapter {}", id, adapter.function);

                let path = source
                    .file_path
                    .to_str()
                    .ok_or(GraphError::InvalidPath { node: id })?;
                let mut line = format!("{} = core.{}(source=", var, adapter.function);
                // Writing into a String cannot fail.
                let _ = write_string_literal(path, &mut line);
                line.push(')');

                body.push(line);
                vars.insert(id, var);
            }
            Node::Filter(filter) => {
                let input = upstream_var(id, node, &feeds, &vars)?;
                let var = format!("fx_{}_{}", id.0, position);
                body.push(filter_call(&var, filter, input));
                vars.insert(id, var);
            }
            Node::Output(output) => {
                let input = upstream_var(id, node, &feeds, &vars)?;
                outputs.push(format!("{}.set_output({})", input, output.output_index));
            }
        }
    }

    let mut script = String::new();
    for line in [IMPORT_LINE, CORE_LINE]
        .into_iter()
        .chain(body.iter().map(String::as_str))
        .chain(outputs.iter().map(String::as_str))
    {
        script.push_str(line);
        script.push('\n');
    }
    Ok(script)
}

/// Variable bound to the producer feeding `node`'s input connector.
fn upstream_var<'a>(
    id: NodeId,
    node: &Node,
    feeds: &HashMap<ConnectorId, ConnectorId>,
    vars: &'a HashMap<NodeId, String>,
) -> CompileResult<&'a str> {
    node.input_connector(id)
        .and_then(|input| feeds.get(&input))
        .and_then(|source| vars.get(&source.node()))
        .map(String::as_str)
        .ok_or(CompileError::DanglingInput { node: id })
}

fn filter_call(var: &str, filter: &FilterNode, input: &str) -> String {
    let mut line = format!(
        "{} = core.{}.{}({}",
        var, filter.plugin_namespace, filter.function_name, input
    );
    for param in &filter.parameters {
        let _ = write!(line, ", {}=", param.name);
        let _ = param.value.write_literal(&mut line);
    }
    line.push(')');
    line
}
