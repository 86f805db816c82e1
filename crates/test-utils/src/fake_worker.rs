use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::sync::mpsc;
use officedag::engine::{DispatchedTask, WorkerBackend, WorkerEvent};
use officedag::errors::Result;

/// A fake worker pool that:
/// - records which tasks were dispatched, in order
/// - reports `Started` then `Completed` for each task, or `Failed` for ids
///   listed in `failing`, from a background task, so any channel capacity
///   works.
pub struct FakeWorker {
    event_tx: mpsc::Sender<WorkerEvent>,
    dispatched: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
}

impl FakeWorker {
    pub fn new(
        event_tx: mpsc::Sender<WorkerEvent>,
        dispatched: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        Self {
            event_tx,
            dispatched,
            failing: HashSet::new(),
        }
    }

    pub fn failing(mut self, ids: &[&str]) -> Self {
        self.failing.extend(ids.iter().map(|s| s.to_string()));
        self
    }
}

impl WorkerBackend for FakeWorker {
    fn dispatch(
        &mut self,
        tasks: Vec<DispatchedTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.event_tx.clone();
        let dispatched = Arc::clone(&self.dispatched);
        let failing = self.failing.clone();

        Box::pin(async move {
            {
                let mut guard = dispatched.lock().unwrap();
                guard.extend(tasks.iter().map(|t| t.id.clone()));
            }

            // Report from a separate task so the coordinator can drain the
            // channel while we send; events keep dispatch order.
            tokio::spawn(async move {
                for t in tasks {
                    let started = WorkerEvent::Started {
                        task: t.id.clone(),
                        worker: format!("fake-{}", t.office),
                    };
                    if tx.send(started).await.is_err() {
                        return;
                    }

                    let outcome = if failing.contains(&t.id) {
                        WorkerEvent::Failed {
                            task: t.id.clone(),
                            error: format!("{} failed on purpose", t.id),
                        }
                    } else {
                        WorkerEvent::Completed {
                            task: t.id.clone(),
                            result: Some(json!({ "done": t.id })),
                        }
                    };
                    if tx.send(outcome).await.is_err() {
                        return;
                    }
                }
            });
            Ok(())
        })
    }
}
