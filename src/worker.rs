//! Blocking execution of the volume-statistics query.

use std::path::Path;

use nix::errno::Errno;
use nix::sys::statvfs;
use tracing::trace;

use crate::types::VolumeStats;

/// Run the blocking `statvfs(3)` call for `path`.
///
/// Must run on a thread that may block; the async surfaces offload it via
/// `spawn_blocking`. The error is the raw platform errno, untranslated.
pub(crate) fn query(path: &Path) -> Result<VolumeStats, Errno> {
    let vfs = statvfs::statvfs(path)?;
    let stats = VolumeStats::from_native(&vfs);
    trace!(path = %path.display(), blocks = stats.blocks, "volume query finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_reports_root_volume() {
        let stats = query(Path::new("/")).unwrap();
        assert!(stats.bsize > 0);
        assert!(stats.frsize > 0);
        assert!(stats.namemax > 0);
        assert!(stats.blocks >= stats.bfree);
        assert!(stats.bfree >= stats.bavail);
    }

    #[test]
    fn query_passes_errno_through() {
        let dir = tempfile::tempdir().unwrap();
        let err = query(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err, Errno::ENOENT);
    }
}
