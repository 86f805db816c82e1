//! Shared helpers for `officedag` integration tests.

pub mod builders;
pub mod fake_worker;

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use officedag::dag::SharedTaskGraph;
use officedag::engine::{Coordinator, CoordinatorOptions, RunReport, WorkerEvent};
use officedag::errors::Result;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt};

use crate::fake_worker::FakeWorker;

static INIT: Once = Once::new();

/// Install a per-test tracing subscriber once.
///
/// The filter comes from `OFFICEDAG_LOG`, then `RUST_LOG`, then `warn`, so
/// scheduler chatter stays out of failing-test output unless asked for.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = std::env::var("OFFICEDAG_LOG")
            .ok()
            .and_then(|s| EnvFilter::try_new(s).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, failing the test if it takes longer than five seconds.
///
/// A coordinator waiting on an event that never comes shows up as a timeout
/// instead of a hung test binary.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Worker event channel sized for tests.
pub fn worker_channel() -> (mpsc::Sender<WorkerEvent>, mpsc::Receiver<WorkerEvent>) {
    mpsc::channel(16)
}

/// Drive `graph` with a [`FakeWorker`] that fails the ids in `failing`.
///
/// Returns the run report and the ids in the order they were dispatched.
pub async fn run_with_fake_worker(
    graph: SharedTaskGraph,
    max_in_flight: usize,
    failing: &[&str],
) -> Result<(RunReport, Vec<String>)> {
    let (tx, rx) = worker_channel();
    let dispatched = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeWorker::new(tx, Arc::clone(&dispatched)).failing(failing);

    let options = CoordinatorOptions {
        max_in_flight,
        ..CoordinatorOptions::default()
    };
    let report = with_timeout(Coordinator::new(graph, backend, rx, options).run()).await?;

    let order = dispatched.lock().unwrap().clone();
    Ok((report, order))
}
