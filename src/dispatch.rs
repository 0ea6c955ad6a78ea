//! Serialized completion dispatch.
//!
//! A single dispatcher task drains completed requests and invokes their
//! callbacks one at a time. Callbacks therefore never run concurrently with
//! each other, regardless of how many worker threads produced the results.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tokio::sync::mpsc;
use tracing::{error, trace};

use crate::task::Task;

/// Drain the completion channel until every sender is gone.
///
/// Senders are held by the submission handle and by in-flight worker steps,
/// so the loop only ends once the handle is dropped and all outstanding
/// requests have dispatched.
pub(crate) async fn run(mut rx: mpsc::UnboundedReceiver<Task>) {
    while let Some(task) = rx.recv().await {
        complete(task);
    }
}

/// Invoke a completed task's callback exactly once, then release the task.
///
/// A panic inside the callback aborts the process: the failure is in caller
/// code and there is no local recovery that preserves the exactly-once
/// contract for it.
pub(crate) fn complete(task: Task) {
    trace!(path = %task.path().display(), "dispatching completion");
    let (notify, result, _permit) = task.into_parts();
    if catch_unwind(AssertUnwindSafe(move || notify(result))).is_err() {
        error!("completion callback panicked; aborting");
        std::process::abort();
    }
    // permit drops here, after the callback has returned
}
