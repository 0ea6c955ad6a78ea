//! Core types for asynchronous volume-statistics queries.

use nix::sys::statvfs::Statvfs;

/// Filesystem volume statistics, as reported by `statvfs(3)`.
///
/// The field set and names mirror the POSIX `statvfs` structure (minus the
/// `f_` prefix) and are part of the compatibility contract of this crate:
/// a record serialized with the `serde` feature carries exactly these names.
///
/// All fields are fixed-width numeric values. Block counts (`blocks`,
/// `bfree`, `bavail`) are in units of `frsize`; `flag` is a mount-flag
/// bitmask and may be any unsigned value.
///
/// # Examples
///
/// ```rust
/// use statvfs::VolumeStats;
///
/// fn report(stats: &VolumeStats) {
///     println!(
///         "{} of {} bytes available",
///         stats.available_bytes(),
///         stats.total_bytes(),
///     );
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeStats {
    /// Filesystem block size.
    pub bsize: u64,
    /// Fragment size, the fundamental allocation unit.
    pub frsize: u64,
    /// Total data blocks, in `frsize` units.
    pub blocks: u64,
    /// Free blocks.
    pub bfree: u64,
    /// Free blocks available to unprivileged users.
    pub bavail: u64,
    /// Total inodes.
    pub files: u64,
    /// Free inodes.
    pub ffree: u64,
    /// Free inodes available to unprivileged users.
    pub favail: u64,
    /// Filesystem id.
    pub fsid: u64,
    /// Mount flags bitmask.
    pub flag: u64,
    /// Maximum filename length.
    pub namemax: u64,
}

impl VolumeStats {
    /// Total capacity of the volume in bytes.
    #[inline]
    pub const fn total_bytes(&self) -> u64 {
        self.frsize.saturating_mul(self.blocks)
    }

    /// Bytes not currently in use.
    #[inline]
    pub const fn free_bytes(&self) -> u64 {
        self.frsize.saturating_mul(self.bfree)
    }

    /// Bytes available to unprivileged users.
    #[inline]
    pub const fn available_bytes(&self) -> u64 {
        self.frsize.saturating_mul(self.bavail)
    }

    /// Bytes currently in use.
    #[inline]
    pub const fn used_bytes(&self) -> u64 {
        self.total_bytes().saturating_sub(self.free_bytes())
    }

    /// Copy the numeric fields out of the platform statvfs buffer.
    pub(crate) fn from_native(vfs: &Statvfs) -> Self {
        Self {
            bsize: vfs.block_size() as u64,
            frsize: vfs.fragment_size() as u64,
            blocks: vfs.blocks() as u64,
            bfree: vfs.blocks_free() as u64,
            bavail: vfs.blocks_available() as u64,
            files: vfs.files() as u64,
            ffree: vfs.files_free() as u64,
            favail: vfs.files_available() as u64,
            fsid: vfs.filesystem_id() as u64,
            flag: vfs.flags().bits() as u64,
            namemax: vfs.name_max() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VolumeStats {
        VolumeStats {
            bsize: 4096,
            frsize: 4096,
            blocks: 1000,
            bfree: 600,
            bavail: 500,
            files: 65536,
            ffree: 60000,
            favail: 60000,
            fsid: 42,
            flag: 0x1006,
            namemax: 255,
        }
    }

    #[test]
    fn byte_accessors() {
        let stats = sample();
        assert_eq!(stats.total_bytes(), 4096 * 1000);
        assert_eq!(stats.free_bytes(), 4096 * 600);
        assert_eq!(stats.available_bytes(), 4096 * 500);
        assert_eq!(stats.used_bytes(), 4096 * 400);
    }

    #[test]
    fn byte_accessors_saturate() {
        let stats = VolumeStats {
            frsize: u64::MAX,
            blocks: 2,
            ..Default::default()
        };
        assert_eq!(stats.total_bytes(), u64::MAX);
    }

    #[test]
    fn stats_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VolumeStats>();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_field_names_match_contract() {
        let json = serde_json::to_value(sample()).unwrap();
        let record = json.as_object().unwrap();
        let expected = [
            "bsize", "frsize", "blocks", "bfree", "bavail", "files", "ffree", "favail", "fsid",
            "flag", "namemax",
        ];
        assert_eq!(record.len(), expected.len());
        for name in expected {
            assert!(record.contains_key(name), "missing field {name}");
        }
    }
}
