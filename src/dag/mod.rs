// src/dag/mod.rs

//! Task dependency graph and scheduling queries.
//!
//! - [`task`] holds the task entity and its serializable view.
//! - [`graph`] owns the tasks and applies readiness and state transitions.
//! - [`levels`] partitions the graph into parallel levels.
//! - [`snapshot`] renders the whole graph for observers.
//! - [`shared`] wraps a graph in one lock for concurrent callers.

pub mod graph;
pub mod levels;
pub mod shared;
pub mod snapshot;
pub mod task;

pub use graph::TaskGraph;
pub use levels::{ParallelLevels, compute_levels};
pub use shared::SharedTaskGraph;
pub use snapshot::GraphSnapshot;
pub use task::{Task, TaskView};
