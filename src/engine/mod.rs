// src/engine/mod.rs

//! Reference coordinator for driving a [`SharedTaskGraph`] to completion.
//!
//! The scheduler core in [`crate::dag`] never executes anything. This module
//! is the caller side of the contract:
//! - claim ready tasks under the graph lock
//! - hand them to a [`WorkerBackend`]
//! - apply the [`WorkerEvent`]s that workers send back
//!
//! [`SharedTaskGraph`]: crate::dag::SharedTaskGraph

use serde_json::Value;

use crate::dag::{GraphSnapshot, Task};
use crate::types::{Office, TaskId};

pub mod backend;
pub mod coordinator;

pub use backend::{SimulatedWorkerPool, WorkerBackend};
pub use coordinator::{Coordinator, CoordinatorOptions};

/// Events flowing from workers back into the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// A worker picked the task up.
    Started { task: TaskId, worker: String },
    /// The task finished successfully.
    Completed { task: TaskId, result: Option<Value> },
    /// The task failed; it will not be retried.
    Failed { task: TaskId, error: String },
}

/// What a worker needs to know about a task it was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedTask {
    pub id: TaskId,
    pub office: Office,
    pub description: String,
}

impl From<&Task> for DispatchedTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            office: task.office.clone(),
            description: task.description.clone(),
        }
    }
}

/// Outcome of one coordinator run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Graph state when the run stopped.
    pub snapshot: GraphSnapshot,
    /// Non-terminal tasks left behind because nothing could make progress
    /// (failed upstream task or dependency cycle). Empty on a clean finish.
    pub stalled: Vec<TaskId>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.stalled.is_empty() && self.snapshot.all_completed
    }
}
