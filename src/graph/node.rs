//! Node kinds of the processing graph.
//!
//! `Node` is a closed sum type. The validator, sorter and emitter match on it
//! exhaustively, so a new kind cannot be added without each phase deciding
//! what to do with it.

use crate::graph::id::{ConnectorId, NodeId};
use crate::graph::port::{
    ConnectorDescriptor, ConnectorDirection, FILTER_CONNECTORS, OUTPUT_CONNECTORS,
    SOURCE_CONNECTORS,
};
use crate::graph::value::ParamValue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Media ingestion point. Zero inputs, one output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    pub file_path: PathBuf,
    /// Selects the source adapter, e.g. `"lsmashsource"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_plugin_hint: Option<String>,
}

impl SourceNode {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            source_plugin_hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.source_plugin_hint = Some(hint.into());
        self
    }
}

/// A named filter argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParamValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single-input, single-output plugin call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterNode {
    pub display_name: String,
    /// Plugin namespace under `core`, e.g. `"std"`.
    pub plugin_namespace: String,
    pub function_name: String,
    /// Keyword arguments, in emission order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl FilterNode {
    pub fn new(
        display_name: impl Into<String>,
        plugin_namespace: impl Into<String>,
        function_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            plugin_namespace: plugin_namespace.into(),
            function_name: function_name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }
}

/// Terminal node binding a clip to a runtime output slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputNode {
    pub output_index: u32,
}

impl OutputNode {
    pub fn new(output_index: u32) -> Self {
        Self { output_index }
    }
}

/// Discriminant of [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Source,
    Filter,
    Output,
}

impl NodeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Source => "Source",
            NodeKind::Filter => "Filter",
            NodeKind::Output => "Output",
        }
    }

    /// Connectors declared by this kind, indexed by port.
    pub fn connectors(&self) -> &'static [ConnectorDescriptor] {
        match self {
            NodeKind::Source => SOURCE_CONNECTORS,
            NodeKind::Filter => FILTER_CONNECTORS,
            NodeKind::Output => OUTPUT_CONNECTORS,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A node of the processing graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Source(SourceNode),
    Filter(FilterNode),
    Output(OutputNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Source(_) => NodeKind::Source,
            Node::Filter(_) => NodeKind::Filter,
            Node::Output(_) => NodeKind::Output,
        }
    }

    /// Human-readable label, used in diagnostics.
    pub fn label(&self) -> String {
        match self {
            Node::Source(n) => format!("Source({})", n.file_path.display()),
            Node::Filter(n) => n.display_name.clone(),
            Node::Output(n) => format!("Output({})", n.output_index),
        }
    }

    pub fn connectors(&self) -> &'static [ConnectorDescriptor] {
        self.kind().connectors()
    }

    /// The input connector of the node stored at `id`, if its kind has one.
    pub fn input_connector(&self, id: NodeId) -> Option<ConnectorId> {
        self.find_connector(id, ConnectorDirection::Input)
    }

    /// The output connector of the node stored at `id`, if its kind has one.
    pub fn output_connector(&self, id: NodeId) -> Option<ConnectorId> {
        self.find_connector(id, ConnectorDirection::Output)
    }

    /// Direction of the connector at `port_index`, if it exists.
    pub fn connector_direction(&self, port_index: u16) -> Option<ConnectorDirection> {
        self.connectors()
            .get(port_index as usize)
            .map(|descriptor| descriptor.direction)
    }

    fn find_connector(&self, id: NodeId, direction: ConnectorDirection) -> Option<ConnectorId> {
        self.connectors()
            .iter()
            .position(|descriptor| descriptor.direction == direction)
            .and_then(|port| ConnectorId::try_new(id, port as u16))
    }
}

impl From<SourceNode> for Node {
    fn from(n: SourceNode) -> Self {
        Node::Source(n)
    }
}

impl From<FilterNode> for Node {
    fn from(n: FilterNode) -> Self {
        Node::Filter(n)
    }
}

impl From<OutputNode> for Node {
    fn from(n: OutputNode) -> Self {
        Node::Output(n)
    }
}
