// src/dag/levels.rs

//! Dependency-level partitioning ("parallel groups").
//!
//! Level `n` holds every task whose in-graph dependencies were all placed in
//! levels `0..n`. Tasks that can never be placed (a dependency cycle, a self
//! reference, or anything downstream of those) are left out of `groups` and
//! reported in `unresolved` instead.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dag::TaskGraph;
use crate::types::TaskId;

/// Result of leveling a [`TaskGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelLevels {
    /// Levels in execution order; ids inside a level follow insertion order.
    pub groups: Vec<Vec<TaskId>>,
    /// Ids that could not be placed in any level, in insertion order.
    pub unresolved: Vec<TaskId>,
}

impl ParallelLevels {
    /// Index of the level containing `id`, if it was placed.
    pub fn level_of(&self, id: &str) -> Option<usize> {
        self.groups
            .iter()
            .position(|level| level.iter().any(|t| t == id))
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Partition the graph into maximal levels of mutually independent tasks.
///
/// Each pass collects every remaining task none of whose dependencies is
/// still remaining. Unknown dependency ids are never "remaining", so they
/// never hold a task back. A pass that finds nothing while tasks remain
/// stops the leveling.
pub fn compute_levels(graph: &TaskGraph) -> ParallelLevels {
    let mut remaining: Vec<&str> = graph.task_ids().collect();
    let mut remaining_set: HashSet<&str> = remaining.iter().copied().collect();
    let mut groups: Vec<Vec<TaskId>> = Vec::new();

    while !remaining.is_empty() {
        let (level, rest): (Vec<&str>, Vec<&str>) =
            remaining.iter().partition(|id| match graph.get(id) {
                Some(task) => task
                    .depends_on
                    .iter()
                    .all(|dep| !remaining_set.contains(dep.as_str())),
                None => true,
            });

        if level.is_empty() {
            warn!(
                unresolved = ?rest,
                "dependency cycle; leaving unresolvable tasks out of the levels"
            );
            return ParallelLevels {
                groups,
                unresolved: rest.into_iter().map(str::to_string).collect(),
            };
        }

        for id in &level {
            remaining_set.remove(id);
        }
        debug!(level = groups.len(), tasks = ?level, "computed parallel level");
        groups.push(level.into_iter().map(str::to_string).collect());
        remaining = rest;
    }

    ParallelLevels {
        groups,
        unresolved: Vec::new(),
    }
}
