//! vsgraph - command line entry point
//!
//! Compiles node-graph project files into VapourSynth scripts.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vsgraph::{
    compiler::{sort, validate},
    AppConfig, Graph, ProjectFile, ScriptCompiler,
};

/// Compile node-editor graphs into VapourSynth scripts
#[derive(Parser)]
#[command(name = "vsgraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a project into a script
    Compile {
        /// Path to the project file (JSON)
        project: PathBuf,

        /// Write the script here instead of stdout
        #[arg(short, long, conflicts_with = "write")]
        output: Option<PathBuf>,

        /// Write the script next to the project, using the configured extension
        #[arg(long)]
        write: bool,

        /// Replace an existing script file
        #[arg(long)]
        force: bool,
    },

    /// Run the full compile and report problems, without writing the script
    Check {
        /// Path to the project file (JSON)
        project: PathBuf,
    },

    /// Print the order in which nodes would be emitted
    Order {
        /// Path to the project file (JSON)
        project: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match &cli.config {
        Some(path) => (
            AppConfig::load(path)
                .with_context(|| format!("failed to load config: {}", path.display()))?,
            None,
        ),
        None => match AppConfig::load_default() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };

    let _log_guard = init_logging(&config)?;
    if let Some(e) = config_error {
        tracing::warn!("Failed to load default config, using defaults: {}", e);
    }

    match cli.command {
        Commands::Compile {
            project,
            output,
            write,
            force,
        } => {
            let target = if write {
                Some(config.script_path_for(&project))
            } else {
                output
            };
            run_compile(&project, target.as_deref(), force || config.overwrite)
        }
        Commands::Check { project } => run_check(&project),
        Commands::Order { project } => run_order(&project),
    }
}

/// Console logging to stderr, plus a daily-rolling file when `log_dir` is set.
fn init_logging(config: &AppConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter()))
        .context("invalid log filter")?;

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "vsgraph.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_graph(project_path: &Path) -> Result<(ProjectFile, Graph)> {
    let project = ProjectFile::load(project_path)?;
    let graph = project
        .to_graph()
        .with_context(|| format!("invalid graph in {}", project_path.display()))?;
    tracing::info!("Loaded project '{}' ({} nodes)", project.name, graph.len());
    Ok((project, graph))
}

fn run_compile(project_path: &Path, target: Option<&Path>, overwrite: bool) -> Result<()> {
    let (_, graph) = load_graph(project_path)?;
    let script = ScriptCompiler::compile(&graph)
        .map_err(|e| describe_failure(&graph, e))
        .with_context(|| format!("failed to compile {}", project_path.display()))?;

    match target {
        Some(path) => {
            if path.exists() && !overwrite {
                bail!(
                    "{} already exists (use --force or set overwrite = true)",
                    path.display()
                );
            }
            std::fs::write(path, &script.text)
                .with_context(|| format!("failed to write script: {}", path.display()))?;
            tracing::info!("Wrote {} lines to {}", script.line_count(), path.display());
        }
        None => print!("{}", script),
    }

    Ok(())
}

fn run_check(project_path: &Path) -> Result<()> {
    let (_, graph) = load_graph(project_path)?;
    let script = ScriptCompiler::compile(&graph)
        .map_err(|e| describe_failure(&graph, e))
        .with_context(|| format!("{} failed validation", project_path.display()))?;
    println!(
        "{}: ok ({} of {} nodes emitted)",
        project_path.display(),
        script.stats.emitted_nodes,
        script.stats.total_nodes
    );
    Ok(())
}

fn run_order(project_path: &Path) -> Result<()> {
    let (_, graph) = load_graph(project_path)?;
    validate(graph.nodes(), graph.connections())
        .map_err(|e| describe_failure(&graph, e))
        .with_context(|| format!("{} failed validation", project_path.display()))?;

    for (position, id) in sort(graph.nodes(), graph.connections())
        .into_iter()
        .enumerate()
    {
        if let Some(node) = graph.node(id) {
            println!("{}\t{}\t{}\t{}", position, id, node.kind(), node.label());
        }
    }
    Ok(())
}

/// Attach the labels of the offending nodes to a compile error.
fn describe_failure(graph: &Graph, error: vsgraph::CompileError) -> anyhow::Error {
    let labels: Vec<String> = error
        .nodes()
        .iter()
        .filter_map(|&id| graph.node(id).map(|n| format!("{} '{}'", id, n.label())))
        .collect();

    if labels.is_empty() {
        anyhow::Error::new(error)
    } else {
        anyhow::Error::new(error).context(format!("offending nodes: {}", labels.join(", ")))
    }
}
