// src/dag/shared.rs

//! Thread-safe handle around a [`TaskGraph`].

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::warn;

use crate::dag::snapshot::GraphSnapshot;
use crate::dag::{ParallelLevels, Task, TaskGraph};
use crate::errors::Result;
use crate::types::{Office, TaskId, TaskStatus, TerminalStatus};

/// Cloneable handle that serialises every operation on one graph.
///
/// A single lock covers the whole graph: readiness queries observe all
/// statuses at one instant, and two workers completing different tasks never
/// expose a half-applied update to a reader. Clones share the same graph.
#[derive(Debug, Clone, Default)]
pub struct SharedTaskGraph {
    inner: Arc<Mutex<TaskGraph>>,
}

impl SharedTaskGraph {
    pub fn new(graph: TaskGraph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TaskGraph> {
        // A worker that panicked mid-update must not wedge the coordinator.
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("task graph lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Run `f` with exclusive access to the graph.
    pub fn with_graph<R>(&self, f: impl FnOnce(&mut TaskGraph) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    pub fn add_task(
        &self,
        id: impl Into<TaskId>,
        office: impl Into<Office>,
        description: impl Into<String>,
        depends_on: Vec<TaskId>,
    ) -> Task {
        self.lock().add_task(id, office, description, depends_on)
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn get_ready_tasks(&self) -> Vec<Task> {
        self.lock().get_ready_tasks()
    }

    pub fn get_ready_tasks_by_office(&self) -> BTreeMap<Office, Vec<Task>> {
        self.lock().get_ready_tasks_by_office()
    }

    /// Read-and-claim in one critical section; see [`TaskGraph::claim_ready`].
    pub fn claim_ready(&self, worker_id: &str, office: Option<&str>) -> Option<Task> {
        self.lock().claim_ready(worker_id, office)
    }

    pub fn claim_all_ready(&self, worker_id: &str) -> Vec<Task> {
        self.lock().claim_all_ready(worker_id)
    }

    pub fn mark_running(&self, id: &str, worker_id: Option<&str>) -> bool {
        self.lock().mark_running(id, worker_id)
    }

    pub fn mark_completed(&self, id: &str, result: Option<Value>) -> bool {
        self.lock().mark_completed(id, result)
    }

    pub fn mark_failed(&self, id: &str, error: impl Into<String>) -> bool {
        self.lock().mark_failed(id, error)
    }

    pub fn mark_skipped(&self, id: &str) -> bool {
        self.lock().mark_skipped(id)
    }

    pub fn set_terminal_status(&self, id: &str, status: TerminalStatus) -> bool {
        self.lock().set_terminal_status(id, status)
    }

    pub fn all_completed(&self) -> bool {
        self.lock().all_completed()
    }

    pub fn get_status_summary(&self) -> BTreeMap<TaskStatus, usize> {
        self.lock().get_status_summary()
    }

    pub fn get_parallel_groups(&self) -> Vec<Vec<TaskId>> {
        self.lock().get_parallel_groups()
    }

    pub fn parallel_levels(&self) -> ParallelLevels {
        self.lock().parallel_levels()
    }

    pub fn to_dict(&self) -> GraphSnapshot {
        self.lock().to_dict()
    }

    pub fn to_json(&self) -> Result<String> {
        self.lock().to_json()
    }
}

impl From<TaskGraph> for SharedTaskGraph {
    fn from(graph: TaskGraph) -> Self {
        Self::new(graph)
    }
}
