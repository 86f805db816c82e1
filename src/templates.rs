// src/templates.rs

//! Pre-built graph topologies for the two standard pipelines.
//!
//! Web application:
//!
//! ```text
//! research -> techstack -> {db_design, ui_design} -> coding
//!          -> {sandbox, testing, security} -> review
//! ```
//!
//! CLI: `research -> techstack -> coding -> sandbox -> review`.

use tracing::debug;

use crate::dag::TaskGraph;
use crate::types::TemplateKind;

fn deps(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// Build the nine-task web application pipeline for `goal`.
pub fn create_webapp_task_graph(goal: &str) -> TaskGraph {
    let mut graph = TaskGraph::new();

    graph.add_task(
        "research",
        "research",
        format!("Research requirements and prior art for: {goal}"),
        Vec::new(),
    );
    graph.add_task(
        "techstack",
        "architecture",
        "Choose the technology stack and overall architecture",
        deps(&["research"]),
    );
    graph.add_task(
        "db_design",
        "database",
        "Design the database schema and data access layer",
        deps(&["techstack"]),
    );
    graph.add_task(
        "ui_design",
        "design",
        "Design the user interface and page flows",
        deps(&["techstack"]),
    );
    graph.add_task(
        "coding",
        "engineering",
        "Implement the application from the schema and UI designs",
        deps(&["db_design", "ui_design"]),
    );
    graph.add_task(
        "sandbox",
        "sandbox",
        "Run the generated application in an isolated sandbox",
        deps(&["coding"]),
    );
    graph.add_task(
        "testing",
        "qa",
        "Write and run the test suite",
        deps(&["coding"]),
    );
    graph.add_task(
        "security",
        "security",
        "Audit the code for security issues",
        deps(&["coding"]),
    );
    graph.add_task(
        "review",
        "review",
        "Review sandbox, test and security findings and sign off",
        deps(&["sandbox", "testing", "security"]),
    );

    debug!(goal, tasks = graph.len(), "built webapp task graph");
    graph
}

/// Build the five-task linear CLI pipeline for `goal`.
pub fn create_cli_task_graph(goal: &str) -> TaskGraph {
    let mut graph = TaskGraph::new();

    graph.add_task(
        "research",
        "research",
        format!("Research requirements for the command-line tool: {goal}"),
        Vec::new(),
    );
    graph.add_task(
        "techstack",
        "architecture",
        "Choose the language, argument parser and packaging",
        deps(&["research"]),
    );
    graph.add_task(
        "coding",
        "engineering",
        "Implement the command-line tool",
        deps(&["techstack"]),
    );
    graph.add_task(
        "sandbox",
        "sandbox",
        "Run the tool in an isolated sandbox",
        deps(&["coding"]),
    );
    graph.add_task(
        "review",
        "review",
        "Review the sandbox run and sign off",
        deps(&["sandbox"]),
    );

    debug!(goal, tasks = graph.len(), "built cli task graph");
    graph
}

pub fn create_task_graph(kind: TemplateKind, goal: &str) -> TaskGraph {
    match kind {
        TemplateKind::Webapp => create_webapp_task_graph(goal),
        TemplateKind::Cli => create_cli_task_graph(goal),
    }
}
