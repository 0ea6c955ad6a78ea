//! # statvfs
//!
//! Asynchronous retrieval of **filesystem volume statistics** — capacity,
//! free space, inode counts, mount flags — for a given path, without
//! blocking the caller.
//!
//! The blocking `statvfs(3)` system call runs on a background worker thread;
//! the result (or the platform error code) travels back to a serialized
//! completion context, which notifies the caller exactly once.
//!
//! ---
//!
//! ## Quick Start
//!
//! The free [`statvfs`] function covers the common one-shot case:
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), statvfs::StatError> {
//! let stats = statvfs::statvfs("/tmp").await?;
//! println!(
//!     "{} of {} bytes available",
//!     stats.available_bytes(),
//!     stats.total_bytes(),
//! );
//! # Ok(())
//! # }
//! ```
//!
//! For many requests, a [`StatVfs`] handle shares one dispatcher and bounds
//! the number of in-flight queries:
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), statvfs::SubmitError> {
//! use statvfs::StatVfs;
//!
//! let vols = StatVfs::new();
//! vols.submit("/tmp", |result| match result {
//!     Ok(stats) => println!("{} blocks free", stats.bfree),
//!     Err(err) => eprintln!("{err}"),
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`StatVfs`] | Request handle — submit callbacks or await futures |
//! | [`statvfs`] | One-shot future-based query, no handle needed |
//! | [`VolumeStats`] | The eleven-field statistics record |
//! | [`SubmitError`] | Synchronous rejection of a submission |
//! | [`QueryError`] | Asynchronous query failure with the raw platform code |
//! | [`StatError`] | Either of the above, for the future-based surfaces |
//!
//! ---
//!
//! ## Completion Contract
//!
//! A caller always sees **either** a synchronous [`SubmitError`] from the
//! submission call **or** exactly one asynchronous notification carrying
//! either the stats or a [`QueryError`] — never both, never neither, never
//! more than one.
//!
//! - Callbacks run on a single dispatcher task, one at a time, so they never
//!   race each other.
//! - Completions across different requests may arrive in any order relative
//!   to submission order.
//! - There is no cancellation: a submitted request always runs to completion
//!   and always notifies.
//! - A panic inside a completion callback aborts the process. The failure is
//!   in caller code; swallowing it would silently break the caller's own
//!   control flow.
//!
//! ---
//!
//! ## Thread Safety
//!
//! [`StatVfs`] is `Send + Sync + Clone`; clones share the dispatcher and the
//! in-flight bound. Submissions are allowed from any thread once the handle
//! exists. Each in-flight request is owned by exactly one pipeline stage at
//! a time, so no locks guard the request state.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Enable serialization for [`VolumeStats`] |
//!
//! ---
//!
//! ## Platform Support
//!
//! Unix only: the crate is a thin asynchronous shell around `statvfs(3)`.
//! Error codes are passed through verbatim as [`Errno`] values, never
//! reinterpreted.

// Private modules
mod dispatch;
mod error;
mod handle;
mod task;
mod types;
mod worker;

// Public re-exports - error types
pub use error::{QueryError, StatError, SubmitError};

// Public re-exports - request surfaces
pub use handle::{DEFAULT_CAPACITY, StatVfs, statvfs};

// Public re-exports - core types
pub use types::VolumeStats;

/// Platform error identifiers, re-exported for matching on
/// [`QueryError::errno`].
pub use nix::errno::Errno;
