// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod templates;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{default_config_path, load_and_validate};
use crate::dag::{SharedTaskGraph, TaskGraph};
use crate::engine::{Coordinator, CoordinatorOptions, SimulatedWorkerPool, WorkerEvent};
use crate::templates::create_task_graph;

pub use crate::dag::{GraphSnapshot, Task, TaskView};
pub use crate::types::{TaskStatus, TemplateKind, TerminalStatus};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - graph construction (template or definition file)
/// - dry-run output
/// - the coordinator with a simulated worker pool
pub async fn run(args: CliArgs) -> Result<()> {
    let graph = build_graph(&args)?;

    if args.dry_run {
        print_dry_run(&graph);
        return Ok(());
    }

    let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>(64);
    let backend = SimulatedWorkerPool::new(event_tx);
    let options = CoordinatorOptions {
        max_in_flight: args.workers,
        ..CoordinatorOptions::default()
    };

    let shared = SharedTaskGraph::new(graph);
    let coordinator = Coordinator::new(shared, backend, event_rx, options);
    let report = coordinator.run().await?;

    info!(
        summary = ?report.snapshot.status_summary,
        complete = report.is_complete(),
        "run finished"
    );

    if args.json {
        println!("{}", report.snapshot.to_json_pretty()?);
    }

    if !report.stalled.is_empty() {
        return Err(anyhow!(
            "run stalled with unfinished tasks: {:?}",
            report.stalled
        ));
    }

    Ok(())
}

fn build_graph(args: &CliArgs) -> Result<TaskGraph> {
    if let Some(kind) = args.template {
        let goal = args.goal.as_deref().unwrap_or_default();
        if goal.trim().is_empty() {
            warn!(?kind, "building template with an empty goal");
        }
        return Ok(create_task_graph(kind, goal));
    }

    let path = args
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let file = load_and_validate(&path)
        .with_context(|| format!("loading graph definition from {:?}", path))?;
    Ok(file.build_graph())
}

/// Dry-run output: tasks, offices, dependencies and parallel levels.
fn print_dry_run(graph: &TaskGraph) {
    println!("officedag dry-run");
    println!();

    println!("tasks ({}):", graph.len());
    for task in graph.tasks() {
        println!("  - {} [{}]", task.id, task.office);
        println!("      description: {}", task.description);
        if !task.depends_on.is_empty() {
            println!("      depends_on: {:?}", task.depends_on);
        }
    }
    println!();

    let levels = graph.parallel_levels();
    println!("parallel levels ({}):", levels.groups.len());
    for (i, level) in levels.groups.iter().enumerate() {
        println!("  {i}: {}", level.join(", "));
    }
    if !levels.unresolved.is_empty() {
        println!("unresolved (dependency cycle): {}", levels.unresolved.join(", "));
    }

    debug!("dry-run complete (no dispatch)");
}
