//! Project file format: the node graph as JSON.
//!
//! ```json
//! {
//!   "version": 1,
//!   "name": "trim and crop",
//!   "nodes": [
//!     { "type": "source", "file_path": "in.mp4", "source_plugin_hint": "lsmashsource" },
//!     { "type": "filter", "display_name": "Crop", "plugin_namespace": "std",
//!       "function_name": "Crop", "parameters": [{ "name": "left", "value": 10 }] },
//!     { "type": "output", "output_index": 0 }
//!   ],
//!   "connections": [{ "from": 0, "to": 1 }, { "from": 1, "to": 2 }]
//! }
//! ```
//!
//! Node ids are positions in `nodes`. A connection joins the output connector
//! of `from` to the input connector of `to`.

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current project file format version
pub const PROJECT_FILE_VERSION: u32 = 1;

/// A connection between two nodes, by node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDef {
    pub from: NodeId,
    pub to: NodeId,
}

/// Serialized graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Project file format version for future compatibility
    #[serde(default = "default_project_version")]
    pub version: u32,

    /// Project name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
}

fn default_project_version() -> u32 {
    PROJECT_FILE_VERSION
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            version: PROJECT_FILE_VERSION,
            name: "Untitled Project".to_string(),
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }
}

impl ProjectFile {
    /// Create an empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Capture a built graph as a project
    pub fn from_graph(name: impl Into<String>, graph: &Graph) -> Self {
        Self {
            version: PROJECT_FILE_VERSION,
            name: name.into(),
            nodes: graph.nodes().to_vec(),
            connections: graph
                .connections()
                .iter()
                .map(|c| ConnectionDef {
                    from: c.from_node(),
                    to: c.to_node(),
                })
                .collect(),
        }
    }

    /// Load a project file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read project file {:?}: {}", path, e))
        })?;

        Self::from_json(&content)
            .map_err(|e| e.with_context(format!("Failed to load project file {:?}", path)))
    }

    /// Parse a project from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let project: Self = serde_json::from_str(content)?;
        if project.version > PROJECT_FILE_VERSION {
            return Err(Error::Config(format!(
                "Unsupported project file version {} (newest supported is {})",
                project.version, PROJECT_FILE_VERSION
            )));
        }
        Ok(project)
    }

    /// Save project file to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create project directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;

        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write project file {:?}: {}", path, e))
        })
    }

    /// Build the graph, checking every structural invariant.
    pub fn to_graph(&self) -> Result<Graph> {
        let mut builder = GraphBuilder::new();
        for node in &self.nodes {
            builder.add_node(node.clone())?;
        }
        for def in &self.connections {
            builder.connect(def.from, def.to)?;
        }
        let graph = builder.build();
        tracing::debug!(
            "Loaded project '{}': {} nodes, {} connections",
            self.name,
            graph.len(),
            graph.connections().len()
        );
        Ok(graph)
    }
}
