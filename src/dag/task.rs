// src/dag/task.rs

//! Task identity plus mutable execution state.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Office, TaskId, TaskStatus};

/// A unit of work tracked by the [`TaskGraph`](crate::dag::TaskGraph).
///
/// All mutation goes through the graph so that transition policy lives in one
/// place; outside the crate a `Task` is only ever handed out as a clone.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub office: Office,
    pub description: String,
    /// Prerequisite ids, in the order they were given. Duplicates, self
    /// references and ids unknown to the graph are all allowed.
    pub depends_on: Vec<TaskId>,
    pub status: TaskStatus,
    pub result: Option<Value>,
    pub error: Option<String>,
    pub worker_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        office: impl Into<Office>,
        description: impl Into<String>,
        depends_on: Vec<TaskId>,
    ) -> Self {
        Self {
            id: id.into(),
            office: office.into(),
            description: description.into(),
            depends_on,
            status: TaskStatus::Pending,
            result: None,
            error: None,
            worker_id: None,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Render this task for snapshots: status as its string tag, timestamps
    /// as ISO-8601 text.
    pub fn view(&self) -> TaskView {
        TaskView {
            id: self.id.clone(),
            office: self.office.clone(),
            description: self.description.clone(),
            depends_on: self.depends_on.clone(),
            status: self.status,
            worker_id: self.worker_id.clone(),
            started_at: self.started_at.map(iso8601),
            completed_at: self.completed_at.map(iso8601),
            result: self.result.clone(),
            error: self.error.clone(),
        }
    }
}

fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serializable, read-only view of a [`Task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: TaskId,
    pub office: Office,
    pub description: String,
    pub depends_on: Vec<TaskId>,
    pub status: TaskStatus,
    pub worker_id: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub result: Option<Value>,
    pub error: Option<String>,
}
