//! The seam between the copy driver and the byte-transfer algorithm.

use std::fs::{File, Metadata};

use crate::error::TransferError;

/// Source attributes captured once, before any bytes move.
///
/// Strategies never re-query the source: [`MmapCopy`](crate::MmapCopy) sizes
/// the target from [`len`](Self::len) even if the file changes underneath it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourceInfo {
    len: u64,
    block_size: u64,
}

impl SourceInfo {
    /// Creates a snapshot from an explicit length and block-size hint.
    #[must_use]
    pub const fn new(len: u64, block_size: u64) -> Self {
        Self { len, block_size }
    }

    /// Captures length and preferred I/O block size from `metadata`.
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self::new(metadata.len(), metadata.blksize())
    }

    /// Source length in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Reports whether the source was empty when captured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Block-size hint reported by the filesystem. Untrusted: may be zero.
    #[must_use]
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }
}

/// An interchangeable algorithm that moves all bytes from source to target.
///
/// Implementations receive descriptors positioned at offset zero, with the
/// target freshly truncated. On success the target holds exactly the bytes
/// the source held, and the number of bytes transferred is returned.
pub trait CopyStrategy {
    /// Short stable name used in logs and copy summaries.
    fn name(&self) -> &'static str;

    /// Transfers the whole source into the target.
    fn transfer(
        &self,
        source: &File,
        target: &File,
        info: &SourceInfo,
    ) -> Result<u64, TransferError>;
}

/// Strategy compiled into this build: chunked memory-mapped copy.
#[cfg(feature = "mmap")]
pub type DefaultStrategy = crate::MmapCopy;

/// Strategy compiled into this build: streaming buffer copy.
#[cfg(not(feature = "mmap"))]
pub type DefaultStrategy = crate::BufferedCopy;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn source_info_reads_length_from_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"twelve bytes").unwrap();
        file.flush().unwrap();

        let info = SourceInfo::from_metadata(&file.as_file().metadata().unwrap());
        assert_eq!(info.len(), 12);
        assert!(!info.is_empty());
        assert!(info.block_size() > 0);
    }

    #[test]
    fn default_strategy_matches_feature() {
        let name = DefaultStrategy::default().name();
        if cfg!(feature = "mmap") {
            assert_eq!(name, "mmap");
        } else {
            assert_eq!(name, "buffered");
        }
    }
}
