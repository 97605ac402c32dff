/// A compiled script for the frame-processing runtime.
///
/// Only `text` is deterministic; `stats` carries timing.
#[derive(Debug, Clone)]
pub struct Script {
    /// The complete script source.
    pub text: String,

    /// Compilation statistics
    pub stats: ScriptStats,
}

/// Statistics about a compile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptStats {
    /// Total number of nodes in the graph (including orphans)
    pub total_nodes: usize,

    /// Number of nodes with a statement in the script
    pub emitted_nodes: usize,

    /// Number of nodes left out (no connections)
    pub omitted_nodes: usize,

    /// Number of filter calls emitted
    pub filter_count: usize,

    /// Number of `set_output` statements emitted
    pub output_count: usize,

    /// Compilation time in microseconds
    pub compile_time_us: u64,
}

impl Script {
    /// Number of lines in the script.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
