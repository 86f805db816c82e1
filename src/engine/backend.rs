// src/engine/backend.rs

//! Pluggable worker backend abstraction.
//!
//! The coordinator talks to a `WorkerBackend` instead of a concrete pool, so
//! tests can swap in a fake that records dispatches and reports outcomes
//! directly.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::debug;

use crate::engine::{DispatchedTask, WorkerEvent};
use crate::errors::Result;

/// Trait abstracting how claimed tasks reach workers.
pub trait WorkerBackend: Send {
    /// Hand the given tasks to workers.
    ///
    /// Implementations report progress by sending [`WorkerEvent`]s on the
    /// channel the coordinator listens on. Returning does not mean the tasks
    /// have finished.
    fn dispatch(
        &mut self,
        tasks: Vec<DispatchedTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Backend that pretends to run every task.
///
/// Each task gets its own Tokio task that reports `Started`, waits for
/// `delay`, then reports `Completed` with a small JSON result. Completions
/// therefore arrive concurrently, the way a real pool would deliver them.
pub struct SimulatedWorkerPool {
    event_tx: mpsc::Sender<WorkerEvent>,
    delay: Duration,
}

impl SimulatedWorkerPool {
    pub fn new(event_tx: mpsc::Sender<WorkerEvent>) -> Self {
        Self {
            event_tx,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl WorkerBackend for SimulatedWorkerPool {
    fn dispatch(
        &mut self,
        tasks: Vec<DispatchedTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.event_tx.clone();
        let delay = self.delay;

        Box::pin(async move {
            for task in tasks {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let worker = format!("{}-worker", task.office);
                    let started = WorkerEvent::Started {
                        task: task.id.clone(),
                        worker: worker.clone(),
                    };
                    if tx.send(started).await.is_err() {
                        debug!(task = %task.id, "coordinator gone; dropping simulated task");
                        return;
                    }

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }

                    let done = WorkerEvent::Completed {
                        task: task.id.clone(),
                        result: Some(json!({
                            "worker": worker,
                            "office": task.office,
                            "simulated": true,
                        })),
                    };
                    if tx.send(done).await.is_err() {
                        debug!(task = %task.id, "coordinator gone before completion");
                    }
                });
            }
            Ok(())
        })
    }
}
