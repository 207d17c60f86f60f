//! Interrupt-driven run wrapper.
//!
//! # Responsibilities
//! - Launch a long-running task as part of the start phase
//! - Block the start phase until the shutdown signal arrives
//! - Observe the task's outcome through its join handle
//!
//! # Design Decisions
//! - The wrapped task receives the shutdown handle and is expected to
//!   wind down when it fires; the wrapper waits for that, bounded by a
//!   grace period
//! - A task that finishes before any signal unblocks the start phase
//!   immediately, so an early failure fails the start phase
//! - On grace-period expiry the task is aborted and the wrapper
//!   reports success with the outcome logged as unknown

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::{ActionFuture, Application};
use crate::error::BoxError;
use crate::lifecycle::Shutdown;

/// Wrap `task` as a start action that blocks until `shutdown` fires.
///
/// The task is spawned when the start action runs and receives a clone
/// of the shutdown handle. The wrapper returns when the task finishes
/// on its own (propagating its outcome) or when the signal arrives, in
/// which case it waits up to `grace` for the task to wind down.
pub fn run_until_shutdown<F, Fut>(
    shutdown: &Shutdown,
    grace: Duration,
    task: F,
) -> impl Fn(&Application) -> ActionFuture + Send + Sync + 'static
where
    F: Fn(Shutdown) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    let shutdown = shutdown.clone();
    move |_: &Application| {
        let shutdown = shutdown.clone();
        let task_future = task(shutdown.clone());
        let wrapper: ActionFuture = Box::pin(async move {
            let mut handle = tokio::spawn(task_future);
            tokio::select! {
                joined = &mut handle => return flatten(joined),
                () = shutdown.triggered() => {}
            }
            info!("interrupt received, waiting for wrapped task to wind down");
            match tokio::time::timeout(grace, &mut handle).await {
                Ok(joined) => flatten(joined),
                Err(_) => {
                    handle.abort();
                    warn!(
                        "wrapped task ignored shutdown for {:?}, aborting; outcome unknown",
                        grace
                    );
                    Ok(())
                }
            }
        });
        wrapper
    }
}

fn flatten(joined: Result<Result<(), BoxError>, tokio::task::JoinError>) -> Result<(), BoxError> {
    match joined {
        Ok(outcome) => outcome,
        Err(err) => Err(Box::new(err)),
    }
}
