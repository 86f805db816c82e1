// src/dag/snapshot.rs

//! Serializable point-in-time view of a whole [`TaskGraph`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dag::TaskGraph;
use crate::dag::task::TaskView;
use crate::errors::Result;
use crate::types::{TaskId, TaskStatus};

/// What external observers (progress UIs, `--json`) get to see.
///
/// Capturing is a pure read, so two snapshots taken without a mutation in
/// between compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub tasks: BTreeMap<TaskId, TaskView>,
    pub status_summary: BTreeMap<TaskStatus, usize>,
    pub parallel_groups: Vec<Vec<TaskId>>,
    pub all_completed: bool,
    /// Ids left out of `parallel_groups` because of a dependency cycle.
    #[serde(default)]
    pub unresolved: Vec<TaskId>,
}

impl GraphSnapshot {
    pub fn capture(graph: &TaskGraph) -> Self {
        let levels = graph.parallel_levels();

        Self {
            tasks: graph
                .tasks()
                .map(|task| (task.id.clone(), task.view()))
                .collect(),
            status_summary: graph.get_status_summary(),
            parallel_groups: levels.groups,
            all_completed: graph.all_completed(),
            unresolved: levels.unresolved,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
