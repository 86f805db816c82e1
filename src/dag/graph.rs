// src/dag/graph.rs

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::dag::levels::{ParallelLevels, compute_levels};
use crate::dag::snapshot::GraphSnapshot;
use crate::dag::task::Task;
use crate::errors::Result;
use crate::types::{Office, TaskId, TaskStatus, TerminalStatus};

/// In-memory task dependency graph keyed by task id.
///
/// It is responsible for:
/// - answering which `Pending` tasks have all their dependencies `Completed`
/// - applying the `Running` / `Completed` / `Failed` / `Skipped` transitions
/// - computing global views (status summary, parallel levels, snapshots)
///
/// Dependency ids that are not in the graph never block anything. Nothing
/// here is synchronised; share a graph between threads through
/// [`SharedTaskGraph`](crate::dag::SharedTaskGraph).
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: HashMap<TaskId, Task>,
    /// Insertion order; the deterministic base order for every query.
    order: Vec<TaskId>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `Pending` task and return a copy of it.
    ///
    /// Re-adding an existing id replaces the previous task (last write wins)
    /// but keeps its original position in the insertion order.
    pub fn add_task(
        &mut self,
        id: impl Into<TaskId>,
        office: impl Into<Office>,
        description: impl Into<String>,
        depends_on: Vec<TaskId>,
    ) -> Task {
        let task = Task::new(id, office, description, depends_on);

        if self.tasks.contains_key(&task.id) {
            warn!(task = %task.id, "task id registered twice; replacing previous task");
        } else {
            self.order.push(task.id.clone());
        }

        debug!(
            task = %task.id,
            office = %task.office,
            deps = ?task.depends_on,
            "added task"
        );

        self.tasks.insert(task.id.clone(), task.clone());
        task
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Task ids in insertion order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    /// Whether every dependency of `id` that exists in the graph is
    /// `Completed`. Returns `None` for an unknown id.
    pub fn deps_satisfied(&self, id: &str) -> Option<bool> {
        let task = self.tasks.get(id)?;
        Some(self.deps_satisfied_for(task))
    }

    fn deps_satisfied_for(&self, task: &Task) -> bool {
        task.depends_on.iter().all(|dep| match self.tasks.get(dep) {
            Some(dep_task) => dep_task.status == TaskStatus::Completed,
            None => true,
        })
    }

    fn is_ready(&self, task: &Task) -> bool {
        task.status == TaskStatus::Pending && self.deps_satisfied_for(task)
    }

    /// Every `Pending` task whose existing dependencies are all `Completed`,
    /// in insertion order.
    ///
    /// Returned tasks stay `Pending`; they keep showing up here until somebody
    /// calls [`mark_running`](Self::mark_running). Use
    /// [`claim_ready`](Self::claim_ready) to read and claim in one step.
    pub fn get_ready_tasks(&self) -> Vec<Task> {
        self.tasks()
            .filter(|task| self.is_ready(task))
            .cloned()
            .collect()
    }

    /// Ready tasks partitioned by office.
    pub fn get_ready_tasks_by_office(&self) -> BTreeMap<Office, Vec<Task>> {
        let mut by_office: BTreeMap<Office, Vec<Task>> = BTreeMap::new();
        for task in self.get_ready_tasks() {
            by_office.entry(task.office.clone()).or_default().push(task);
        }
        by_office
    }

    /// Claim the first ready task (optionally restricted to one office) for
    /// `worker_id`, marking it `Running` before anyone else can see it ready.
    pub fn claim_ready(&mut self, worker_id: &str, office: Option<&str>) -> Option<Task> {
        let id = self
            .tasks()
            .find(|task| self.is_ready(task) && office.is_none_or(|o| task.office == o))
            .map(|task| task.id.clone())?;

        self.mark_running(&id, Some(worker_id));
        self.tasks.get(&id).cloned()
    }

    /// Claim every currently ready task for `worker_id`.
    pub fn claim_all_ready(&mut self, worker_id: &str) -> Vec<Task> {
        let ids: Vec<TaskId> = self.get_ready_tasks().into_iter().map(|t| t.id).collect();

        ids.iter()
            .filter_map(|id| {
                self.mark_running(id, Some(worker_id));
                self.tasks.get(id).cloned()
            })
            .collect()
    }

    /// Mark a task `Running` and stamp its start time.
    ///
    /// The previous status is not checked; calling this twice re-stamps
    /// `started_at`. Returns `false` if the id is unknown.
    pub fn mark_running(&mut self, id: &str, worker_id: Option<&str>) -> bool {
        let Some(task) = self.tasks.get_mut(id) else {
            warn!(task = %id, "mark_running for unknown task; ignoring");
            return false;
        };

        task.status = TaskStatus::Running;
        task.worker_id = worker_id.map(str::to_string);
        task.started_at = Some(Utc::now());
        debug!(task = %id, worker = ?worker_id, "task running");
        true
    }

    /// Mark a task `Completed`, storing its result.
    pub fn mark_completed(&mut self, id: &str, result: Option<Value>) -> bool {
        let Some(task) = self.tasks.get_mut(id) else {
            warn!(task = %id, "mark_completed for unknown task; ignoring");
            return false;
        };

        task.status = TaskStatus::Completed;
        task.result = result;
        task.completed_at = Some(Utc::now());
        debug!(task = %id, "task completed");
        true
    }

    /// Mark a task `Failed`, storing the error message.
    pub fn mark_failed(&mut self, id: &str, error: impl Into<String>) -> bool {
        let Some(task) = self.tasks.get_mut(id) else {
            warn!(task = %id, "mark_failed for unknown task; ignoring");
            return false;
        };

        let error = error.into();
        warn!(task = %id, %error, "task failed");
        task.status = TaskStatus::Failed;
        task.error = Some(error);
        task.completed_at = Some(Utc::now());
        true
    }

    /// Mark a task `Skipped`.
    pub fn mark_skipped(&mut self, id: &str) -> bool {
        self.set_terminal_status(id, TerminalStatus::Skipped)
    }

    /// Assign a terminal status directly, without touching `result` or
    /// `error`. Returns `false` if the id is unknown.
    pub fn set_terminal_status(&mut self, id: &str, status: TerminalStatus) -> bool {
        let Some(task) = self.tasks.get_mut(id) else {
            warn!(task = %id, ?status, "set_terminal_status for unknown task; ignoring");
            return false;
        };

        task.status = status.into();
        task.completed_at = Some(Utc::now());
        debug!(task = %id, status = %task.status, "terminal status assigned");
        true
    }

    /// True when every task is `Completed`, `Failed` or `Skipped`. Vacuously
    /// true for an empty graph.
    pub fn all_completed(&self) -> bool {
        self.tasks.values().all(Task::is_terminal)
    }

    /// Number of tasks per stored status, with every status present.
    pub fn get_status_summary(&self) -> BTreeMap<TaskStatus, usize> {
        let mut summary: BTreeMap<TaskStatus, usize> =
            TaskStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for task in self.tasks.values() {
            *summary.entry(task.status).or_insert(0) += 1;
        }
        summary
    }

    /// Dependency levels; tasks on a cycle (or waiting on one) are omitted.
    /// See [`parallel_levels`](Self::parallel_levels) for the omitted ids.
    pub fn get_parallel_groups(&self) -> Vec<Vec<TaskId>> {
        compute_levels(self).groups
    }

    pub fn parallel_levels(&self) -> ParallelLevels {
        compute_levels(self)
    }

    /// Return the id of a task that sits on a dependency cycle, if any.
    ///
    /// Edges to ids outside the graph are ignored; a self reference counts
    /// as a cycle.
    pub fn find_cycle(&self) -> Option<TaskId> {
        // Edge direction: dep -> task.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for id in self.task_ids() {
            graph.add_node(id);
        }
        for task in self.tasks() {
            for dep in task.depends_on.iter() {
                if self.tasks.contains_key(dep) {
                    graph.add_edge(dep.as_str(), task.id.as_str(), ());
                }
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => None,
            Err(cycle) => Some(cycle.node_id().to_string()),
        }
    }

    /// Full read-only snapshot of the graph.
    pub fn to_dict(&self) -> GraphSnapshot {
        GraphSnapshot::capture(self)
    }

    /// UTF-8 JSON rendering of [`to_dict`](Self::to_dict).
    pub fn to_json(&self) -> Result<String> {
        self.to_dict().to_json()
    }
}
