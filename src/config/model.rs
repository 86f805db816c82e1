// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::config::validate::validate_config;
use crate::dag::TaskGraph;
use crate::errors::OfficedagError;
use crate::templates::create_task_graph;
use crate::types::TemplateKind;

/// Graph definition as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// template = "webapp"
/// goal = "Budget Tracker"
///
/// [task.docs]
/// office = "writing"
/// description = "Write the README"
/// depends_on = ["review"]
/// ```
///
/// All sections are optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawGraphFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Tasks from `[task.<id>]`, keyed by task id.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// Seed the graph from a built-in template before adding file tasks.
    #[serde(default)]
    pub template: Option<TemplateKind>,

    /// Goal text for the template; required when `template` is set.
    #[serde(default)]
    pub goal: Option<String>,

    /// Reject graphs containing a dependency cycle instead of leaving the
    /// cyclic tasks out of the parallel levels.
    #[serde(default)]
    pub strict_cycles: bool,
}

/// `[task.<id>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Which kind of worker may claim the task.
    pub office: String,

    #[serde(default)]
    pub description: String,

    /// Ids this task waits for. Ids that name no task are ignored.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// A validated graph definition.
#[derive(Debug, Clone)]
pub struct GraphFile {
    pub config: ConfigSection,
    pub task: BTreeMap<String, TaskConfig>,
}

impl GraphFile {
    /// Build a fresh [`TaskGraph`]: template tasks first, then file tasks in
    /// id order. A file task with a template task's id replaces it.
    pub fn build_graph(&self) -> TaskGraph {
        build_graph_from_sections(&self.config, &self.task)
    }
}

pub(crate) fn build_graph_from_sections(
    config: &ConfigSection,
    tasks: &BTreeMap<String, TaskConfig>,
) -> TaskGraph {
    let mut graph = match (config.template, config.goal.as_deref()) {
        (Some(kind), Some(goal)) => create_task_graph(kind, goal),
        _ => TaskGraph::new(),
    };

    for (id, task) in tasks.iter() {
        graph.add_task(
            id.clone(),
            task.office.clone(),
            task.description.clone(),
            task.depends_on.clone(),
        );
    }

    debug!(tasks = graph.len(), "built task graph from definition");
    graph
}

impl TryFrom<RawGraphFile> for GraphFile {
    type Error = OfficedagError;

    fn try_from(raw: RawGraphFile) -> Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(Self {
            config: raw.config,
            task: raw.task,
        })
    }
}
