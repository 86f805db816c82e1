#![allow(dead_code)]

use std::collections::BTreeMap;

use officedag::TemplateKind;
use officedag::config::{ConfigSection, GraphFile, RawGraphFile, TaskConfig};
use officedag::dag::TaskGraph;

/// Builder for `GraphFile` to simplify test setup.
pub struct GraphFileBuilder {
    raw: RawGraphFile,
}

impl GraphFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawGraphFile {
                config: ConfigSection::default(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, id: &str, task: TaskConfig) -> Self {
        self.raw.task.insert(id.to_string(), task);
        self
    }

    pub fn with_template(mut self, kind: TemplateKind, goal: &str) -> Self {
        self.raw.config.template = Some(kind);
        self.raw.config.goal = Some(goal.to_string());
        self
    }

    pub fn strict_cycles(mut self, val: bool) -> Self {
        self.raw.config.strict_cycles = val;
        self
    }

    /// The unvalidated definition, for exercising validation errors.
    pub fn build_raw(self) -> RawGraphFile {
        self.raw
    }

    pub fn build(self) -> GraphFile {
        GraphFile::try_from(self.raw).expect("Failed to build valid graph file from builder")
    }
}

impl Default for GraphFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(office: &str) -> Self {
        Self {
            task: TaskConfig {
                office: office.to_string(),
                description: String::new(),
                depends_on: vec![],
            },
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.task.description = text.to_string();
        self
    }

    pub fn depends_on(mut self, dep: &str) -> Self {
        self.task.depends_on.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

/// Build a graph directly from `(id, office, deps)` triples, in order.
pub fn graph_from_edges(tasks: &[(&str, &str, &[&str])]) -> TaskGraph {
    let mut graph = TaskGraph::new();
    for (id, office, deps) in tasks {
        graph.add_task(
            *id,
            *office,
            format!("task {id}"),
            deps.iter().map(|d| d.to_string()).collect(),
        );
    }
    graph
}

/// Linear chain `t0 -> t1 -> ... -> t{n-1}`, all in office `"work"`.
pub fn chain_graph(n: usize) -> TaskGraph {
    let mut graph = TaskGraph::new();
    for i in 0..n {
        let deps = if i == 0 {
            vec![]
        } else {
            vec![format!("t{}", i - 1)]
        };
        graph.add_task(format!("t{i}"), "work", format!("step {i}"), deps);
    }
    graph
}
