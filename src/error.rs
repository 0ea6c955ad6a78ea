//! Error types for asynchronous volume-statistics requests.
//!
//! Failures split into two channels that never mix:
//!
//! - [`SubmitError`] is returned synchronously from the submission call
//!   itself and never reaches a completion callback.
//! - [`QueryError`] is only ever delivered through the completion callback's
//!   error slot, after the background query has run.
//!
//! [`StatError`] combines both for the future-based surfaces.

use std::path::{Path, PathBuf};

use nix::errno::Errno;

/// Synchronous failure of a submission call.
///
/// When one of these is returned the request was rejected before any
/// background work started, and the completion callback will never run.
///
/// # Examples
///
/// ```rust
/// use statvfs::SubmitError;
///
/// let err = SubmitError::QueueFull { capacity: 64 };
/// assert_eq!(err.to_string(), "submission queue full (capacity 64)");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request path was empty.
    #[error("empty path")]
    EmptyPath,

    /// The request path contains an interior NUL byte and cannot cross the
    /// syscall boundary.
    #[error("invalid path: {path:?} (interior NUL byte)")]
    InvalidPath {
        /// The rejected path.
        path: PathBuf,
    },

    /// The in-flight request limit was reached.
    #[error("submission queue full (capacity {capacity})")]
    QueueFull {
        /// The configured in-flight capacity.
        capacity: usize,
    },

    /// The completion dispatcher is no longer accepting work.
    #[error("dispatcher shut down")]
    Shutdown,
}

/// Failure of the underlying `statvfs(3)` query.
///
/// Delivered exclusively through the completion callback's error slot.
/// Carries the platform error code verbatim, untranslated, together with the
/// offending path; interpretation is left to the caller.
///
/// # Examples
///
/// ```rust
/// use statvfs::{Errno, QueryError};
///
/// fn is_missing(err: &QueryError) -> bool {
///     err.errno() == Errno::ENOENT
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("statvfs failed for {}: {errno}", path.display())]
pub struct QueryError {
    path: PathBuf,
    errno: Errno,
}

impl QueryError {
    pub(crate) fn new(path: PathBuf, errno: Errno) -> Self {
        Self { path, errno }
    }

    /// The raw platform error code.
    #[inline]
    pub fn code(&self) -> i32 {
        self.errno as i32
    }

    /// The platform error identifier.
    #[inline]
    pub fn errno(&self) -> Errno {
        self.errno
    }

    /// The path whose query failed.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Any failure of a future-based query.
///
/// Wraps the two failure channels for surfaces that resolve as a single
/// `Result`, such as [`statvfs`](crate::statvfs) and
/// [`StatVfs::query`](crate::StatVfs::query).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StatError {
    /// The request was rejected at submission time.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The volume query itself failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_display() {
        assert_eq!(SubmitError::EmptyPath.to_string(), "empty path");
    }

    #[test]
    fn invalid_path_display_names_path() {
        let err = SubmitError::InvalidPath {
            path: PathBuf::from("/bad"),
        };
        assert!(err.to_string().contains("/bad"));
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn queue_full_display_names_capacity() {
        let err = SubmitError::QueueFull { capacity: 8 };
        assert_eq!(err.to_string(), "submission queue full (capacity 8)");
    }

    #[test]
    fn query_error_display_names_path_and_errno() {
        let err = QueryError::new(PathBuf::from("/missing"), Errno::ENOENT);
        let rendered = err.to_string();
        assert!(rendered.contains("statvfs failed"));
        assert!(rendered.contains("/missing"));
    }

    #[test]
    fn query_error_code_passes_through_verbatim() {
        let err = QueryError::new(PathBuf::from("/missing"), Errno::ENOENT);
        assert_eq!(err.code(), Errno::ENOENT as i32);
        assert_eq!(err.errno(), Errno::ENOENT);
        assert_eq!(err.path(), Path::new("/missing"));
    }

    #[test]
    fn stat_error_is_transparent() {
        let submit: StatError = SubmitError::EmptyPath.into();
        assert_eq!(submit.to_string(), "empty path");

        let query: StatError = QueryError::new(PathBuf::from("/x"), Errno::EACCES).into();
        assert!(query.to_string().contains("/x"));
    }
}
