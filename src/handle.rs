//! Request submission and the public asynchronous surfaces.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime;
use tokio::sync::{Semaphore, TryAcquireError, mpsc, oneshot};
use tracing::debug;

use crate::dispatch;
use crate::error::{QueryError, StatError, SubmitError};
use crate::task::Task;
use crate::types::VolumeStats;
use crate::worker;

/// Default bound on in-flight requests per handle.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Handle for asynchronous volume-statistics requests.
///
/// Each handle owns a completion dispatcher: a single task that invokes
/// completion callbacks one at a time, in whatever order the background
/// queries finish. The blocking `statvfs(3)` calls themselves run on the
/// Tokio blocking pool, many at a time.
///
/// Dropping the handle does not cancel in-flight requests; every submitted
/// request runs to completion and delivers exactly one notification.
///
/// Handles are cheap to clone; clones share the dispatcher and the in-flight
/// limit.
///
/// # Examples
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), statvfs::StatError> {
/// use statvfs::StatVfs;
///
/// let vols = StatVfs::new();
/// let stats = vols.query("/tmp").await?;
/// assert!(stats.blocks >= stats.bfree);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StatVfs {
    tx: mpsc::UnboundedSender<Task>,
    limit: Arc<Semaphore>,
    capacity: usize,
    rt: runtime::Handle,
}

impl StatVfs {
    /// Create a handle with the default in-flight capacity.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime; the dispatcher task and
    /// the blocking workers are spawned onto the current runtime.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a handle that admits at most `capacity` in-flight requests.
    ///
    /// Submissions beyond the bound fail synchronously with
    /// [`SubmitError::QueueFull`] until earlier requests have dispatched.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn with_capacity(capacity: usize) -> Self {
        let rt = runtime::Handle::current();
        let (tx, rx) = mpsc::unbounded_channel();
        rt.spawn(dispatch::run(rx));
        Self {
            tx,
            limit: Arc::new(Semaphore::new(capacity)),
            capacity,
            rt,
        }
    }

    /// Submit an asynchronous volume-statistics request for `path`.
    ///
    /// Returns as soon as the request is handed to the worker pool. `notify`
    /// is invoked later, exactly once, from the handle's dispatcher: with
    /// `Ok(stats)` when the query succeeded, or `Err(e)` carrying the
    /// platform error code and the path when it failed.
    ///
    /// Rejected requests report a [`SubmitError`] synchronously instead, and
    /// `notify` is then never invoked. Completions across different requests
    /// may arrive in any order relative to submission order.
    ///
    /// If `notify` panics the process is aborted.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::EmptyPath`] — `path` is empty.
    /// - [`SubmitError::InvalidPath`] — `path` contains an interior NUL byte.
    /// - [`SubmitError::QueueFull`] — the in-flight bound is exhausted.
    /// - [`SubmitError::Shutdown`] — the dispatcher is gone (runtime
    ///   shutdown).
    pub fn submit<P, F>(&self, path: P, notify: F) -> Result<(), SubmitError>
    where
        P: Into<PathBuf>,
        F: FnOnce(Result<VolumeStats, QueryError>) + Send + 'static,
    {
        let path = validate(path.into())?;
        let permit = match self.limit.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::NoPermits) => {
                return Err(SubmitError::QueueFull {
                    capacity: self.capacity,
                });
            }
            Err(TryAcquireError::Closed) => return Err(SubmitError::Shutdown),
        };
        if self.tx.is_closed() {
            return Err(SubmitError::Shutdown);
        }

        debug!(path = %path.display(), "volume stats request submitted");

        let mut task = Task::new(path, Box::new(notify), permit);
        let tx = self.tx.clone();
        self.rt.spawn_blocking(move || {
            task.execute();
            // The receiver outlives every sender; this send only fails when
            // the runtime is torn down mid-request.
            let _ = tx.send(task);
        });
        Ok(())
    }

    /// Query volume statistics for `path`, resolving as a future.
    ///
    /// Future-based wrapper over [`submit`](Self::submit): the completion is
    /// forwarded through a oneshot channel and awaited.
    ///
    /// # Errors
    ///
    /// [`StatError::Submit`] for synchronous rejections, [`StatError::Query`]
    /// when the underlying query failed.
    pub async fn query<P: Into<PathBuf>>(&self, path: P) -> Result<VolumeStats, StatError> {
        let (reply, response) = oneshot::channel();
        self.submit(path, move |result| {
            let _ = reply.send(result);
        })?;
        match response.await {
            Ok(result) => Ok(result?),
            // Dispatch always fires the callback; the reply only vanishes
            // when the runtime is torn down mid-request.
            Err(_) => Err(SubmitError::Shutdown.into()),
        }
    }
}

impl Default for StatVfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Query volume statistics for `path` without a handle.
///
/// One-shot convenience: offloads the blocking `statvfs(3)` call to the
/// current runtime's blocking pool and resolves with the result. Requests
/// made this way bypass the per-handle in-flight bound and dispatcher;
/// completions resolve directly on the awaiting task.
///
/// # Examples
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), statvfs::StatError> {
/// let stats = statvfs::statvfs("/tmp").await?;
/// println!("{} bytes available", stats.available_bytes());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`StatError::Submit`] when validation fails, [`StatError::Query`] when
/// the query fails.
pub async fn statvfs<P: Into<PathBuf>>(path: P) -> Result<VolumeStats, StatError> {
    let path = validate(path.into())?;
    let result = tokio::task::spawn_blocking(move || match worker::query(&path) {
        Ok(stats) => Ok(stats),
        Err(errno) => Err(QueryError::new(path, errno)),
    })
    .await
    .map_err(|_| SubmitError::Shutdown)?;
    Ok(result?)
}

/// Reject requests that cannot reach the syscall boundary.
fn validate(path: PathBuf) -> Result<PathBuf, SubmitError> {
    if path.as_os_str().is_empty() {
        return Err(SubmitError::EmptyPath);
    }
    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(SubmitError::InvalidPath { path });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    #[test]
    fn validate_rejects_empty_path() {
        assert!(matches!(
            validate(PathBuf::new()),
            Err(SubmitError::EmptyPath)
        ));
    }

    #[test]
    fn validate_rejects_interior_nul() {
        let bad = PathBuf::from(OsString::from_vec(b"/tm\0p".to_vec()));
        assert!(matches!(
            validate(bad),
            Err(SubmitError::InvalidPath { .. })
        ));
    }

    #[test]
    fn validate_accepts_ordinary_path() {
        assert!(validate(PathBuf::from("/tmp")).is_ok());
    }
}
