// src/engine/coordinator.rs

use std::collections::HashSet;
use std::fmt;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::dag::{GraphSnapshot, SharedTaskGraph, Task};
use crate::engine::{DispatchedTask, RunReport, WorkerBackend, WorkerEvent};
use crate::errors::Result;
use crate::types::TaskId;

/// Tuning knobs for a [`Coordinator`].
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    /// Upper bound on tasks handed out and not yet finished. `0` is treated
    /// as `1`.
    pub max_in_flight: usize,
    /// Worker id recorded on tasks at claim time, until a worker reports
    /// `Started` with its own id.
    pub claim_id: String,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            max_in_flight: 4,
            claim_id: "coordinator".to_string(),
        }
    }
}

/// Polls the graph for ready tasks, dispatches them, and applies worker
/// reports until every task is terminal or nothing can make progress.
///
/// Ready tasks are claimed in the same critical section that finds them, so
/// no task is dispatched twice.
pub struct Coordinator<B: WorkerBackend> {
    graph: SharedTaskGraph,
    backend: B,
    event_rx: mpsc::Receiver<WorkerEvent>,
    options: CoordinatorOptions,
    progress_tx: Option<watch::Sender<GraphSnapshot>>,
}

impl<B: WorkerBackend> fmt::Debug for Coordinator<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("graph", &self.graph)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<B: WorkerBackend> Coordinator<B> {
    pub fn new(
        graph: SharedTaskGraph,
        backend: B,
        event_rx: mpsc::Receiver<WorkerEvent>,
        options: CoordinatorOptions,
    ) -> Self {
        Self {
            graph,
            backend,
            event_rx,
            options,
            progress_tx: None,
        }
    }

    /// Publish a snapshot after every transition on the returned channel.
    pub fn subscribe(&mut self) -> watch::Receiver<GraphSnapshot> {
        let (tx, rx) = watch::channel(self.graph.to_dict());
        self.progress_tx = Some(tx);
        rx
    }

    /// Main loop.
    pub async fn run(mut self) -> Result<RunReport> {
        let capacity = self.options.max_in_flight.max(1);
        let mut in_flight: HashSet<TaskId> = HashSet::new();

        info!(
            tasks = self.graph.len(),
            max_in_flight = capacity,
            "coordinator started"
        );

        loop {
            if self.graph.all_completed() && in_flight.is_empty() {
                info!("all tasks terminal; coordinator finished");
                break;
            }

            let free = capacity.saturating_sub(in_flight.len());
            let claimed = self.claim_up_to(free);
            if !claimed.is_empty() {
                in_flight.extend(claimed.iter().map(|t| t.id.clone()));
                self.publish();
                self.dispatch(&claimed).await?;
            }

            if in_flight.is_empty() {
                // Nothing running and nothing claimable.
                break;
            }

            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    warn!(
                        in_flight = ?in_flight,
                        "worker event channel closed with tasks in flight"
                    );
                    break;
                }
            };

            debug!(?event, "coordinator received worker event");
            self.apply(event, &mut in_flight);
            self.publish();
        }

        let snapshot = self.graph.to_dict();
        let stalled: Vec<TaskId> = self.graph.with_graph(|g| {
            g.tasks()
                .filter(|t| !t.is_terminal())
                .map(|t| t.id.clone())
                .collect()
        });

        if !stalled.is_empty() {
            warn!(
                ?stalled,
                "coordinator stopped with unfinished tasks (failed upstream or dependency cycle)"
            );
        }

        Ok(RunReport { snapshot, stalled })
    }

    fn claim_up_to(&self, free: usize) -> Vec<Task> {
        let claim_id = self.options.claim_id.as_str();
        self.graph.with_graph(|g| {
            let mut claimed = Vec::new();
            while claimed.len() < free {
                match g.claim_ready(claim_id, None) {
                    Some(task) => claimed.push(task),
                    None => break,
                }
            }
            claimed
        })
    }

    async fn dispatch(&mut self, tasks: &[Task]) -> Result<()> {
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        info!(tasks = ?ids, "dispatching ready tasks");

        let batch: Vec<DispatchedTask> = tasks.iter().map(DispatchedTask::from).collect();
        if let Err(err) = self.backend.dispatch(batch).await {
            // No worker will ever report on this batch; release the claims.
            let reason = format!("dispatch failed: {err}");
            warn!(tasks = ?ids, %reason, "worker backend rejected batch");
            self.graph.with_graph(|g| {
                for task in tasks {
                    g.mark_failed(&task.id, reason.clone());
                }
            });
            self.publish();
            return Err(err);
        }
        Ok(())
    }

    fn apply(&self, event: WorkerEvent, in_flight: &mut HashSet<TaskId>) {
        match event {
            WorkerEvent::Started { task, worker } => {
                // Late `Started` after the task already finished is stale.
                if in_flight.contains(&task) {
                    self.graph.mark_running(&task, Some(&worker));
                }
            }
            WorkerEvent::Completed { task, result } => {
                if self.graph.mark_completed(&task, result) {
                    info!(task = %task, "task completed");
                }
                in_flight.remove(&task);
            }
            WorkerEvent::Failed { task, error } => {
                self.graph.mark_failed(&task, error);
                in_flight.remove(&task);
            }
        }
    }

    fn publish(&self) {
        if let Some(tx) = &self.progress_tx {
            // `send_replace` keeps working with no receivers left.
            tx.send_replace(self.graph.to_dict());
        }
    }
}
