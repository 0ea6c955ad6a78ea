//! The task record handed between submission, execution, and dispatch.

use std::path::{Path, PathBuf};

use nix::errno::Errno;
use tokio::sync::OwnedSemaphorePermit;

use crate::error::QueryError;
use crate::types::VolumeStats;
use crate::worker;

/// Completion callback stored inside a task.
pub(crate) type Notify = Box<dyn FnOnce(Result<VolumeStats, QueryError>) + Send + 'static>;

/// Result of the worker step.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// The worker step has not run yet.
    Pending,
    /// The query succeeded.
    Success(VolumeStats),
    /// The query failed with a platform error code.
    Failure(Errno),
}

/// A single in-flight request.
///
/// Exactly one stage owns a task at any time: submission builds it, the
/// worker step fills in `outcome`, dispatch consumes it. Ownership moves
/// between stages, so no stage ever shares mutable access with another.
///
/// The permit bounds the number of in-flight requests; it is released when
/// the task is dropped, after the callback has returned.
pub(crate) struct Task {
    path: PathBuf,
    notify: Notify,
    outcome: Outcome,
    permit: OwnedSemaphorePermit,
}

impl Task {
    pub(crate) fn new(path: PathBuf, notify: Notify, permit: OwnedSemaphorePermit) -> Self {
        Self {
            path,
            notify,
            outcome: Outcome::Pending,
            permit,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Worker step: run the blocking query and record its outcome.
    ///
    /// Writes `outcome` exactly once, transitioning `Pending` to either
    /// `Success` or `Failure`.
    pub(crate) fn execute(&mut self) {
        debug_assert!(matches!(self.outcome, Outcome::Pending));
        self.outcome = match worker::query(&self.path) {
            Ok(stats) => Outcome::Success(stats),
            Err(errno) => Outcome::Failure(errno),
        };
    }

    /// Consume the task into its callback, final result, and permit.
    ///
    /// The permit is returned separately so the caller can hold it until the
    /// callback has run.
    pub(crate) fn into_parts(
        self,
    ) -> (Notify, Result<VolumeStats, QueryError>, OwnedSemaphorePermit) {
        let Task {
            path,
            notify,
            outcome,
            permit,
        } = self;
        let result = match outcome {
            Outcome::Success(stats) => Ok(stats),
            Outcome::Failure(errno) => Err(QueryError::new(path, errno)),
            Outcome::Pending => unreachable!("task reached dispatch without running the worker step"),
        };
        (notify, result, permit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    fn permit(limit: &Arc<Semaphore>) -> OwnedSemaphorePermit {
        limit.clone().try_acquire_owned().unwrap()
    }

    #[test]
    fn execute_records_success_for_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let limit = Arc::new(Semaphore::new(1));
        let mut task = Task::new(dir.path().to_path_buf(), Box::new(|_| {}), permit(&limit));

        task.execute();

        let (_, result, _) = task.into_parts();
        let stats = result.unwrap();
        assert!(stats.blocks >= stats.bfree);
    }

    #[test]
    fn execute_records_failure_for_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let limit = Arc::new(Semaphore::new(1));
        let mut task = Task::new(missing.clone(), Box::new(|_| {}), permit(&limit));

        task.execute();

        let (_, result, _) = task.into_parts();
        let err = result.unwrap_err();
        assert_eq!(err.errno(), Errno::ENOENT);
        assert_eq!(err.path(), missing);
    }

    #[test]
    fn permit_is_released_when_task_drops() {
        let limit = Arc::new(Semaphore::new(1));
        let task = Task::new(PathBuf::from("/"), Box::new(|_| {}), permit(&limit));
        assert_eq!(limit.available_permits(), 0);

        drop(task);
        assert_eq!(limit.available_permits(), 1);
    }
}
