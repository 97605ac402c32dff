//! # vsgraph: node graph to VapourSynth script compiler
//!
//! Takes the directed graph authored in a node editor (one or more sources,
//! a chain of filters, one or more outputs) and compiles it into a
//! VapourSynth script for the frame-processing runtime.
//!
//! ## Architecture
//!
//! - **Graph**: arena of `Node`s joined by `Connection`s between connectors
//! - **Compiler**: validate → topological sort → emit, as a pure function
//! - **Config**: TOML tool configuration and JSON project files
//!
//! ## Example
//!
//! ```
//! use vsgraph::graph::{FilterNode, GraphBuilder, OutputNode, SourceNode};
//!
//! let mut builder = GraphBuilder::new();
//! let src = builder.add_node(SourceNode::new("in.mp4"))?;
//! let crop = builder.add_node(FilterNode::new("Crop", "std", "Crop").param("left", 10))?;
//! let out = builder.add_node(OutputNode::new(0))?;
//! builder.connect(src, crop)?;
//! builder.connect(crop, out)?;
//!
//! let script = vsgraph::compile(&builder.build())?;
//! assert!(script.text.contains("fx_1_1 = core.std.Crop(src_0, left=10)"));
//! assert!(script.text.ends_with("fx_1_1.set_output(0)\n"));
//! # Ok::<(), vsgraph::Error>(())
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod graph;

// Re-export commonly used types
pub use compiler::{compile, CompileError, Script, ScriptCompiler, ScriptStats};
pub use config::{AppConfig, ProjectFile};
pub use error::{Error, Result, ResultExt};
pub use graph::{Graph, GraphBuilder, GraphError, Node, NodeId};
