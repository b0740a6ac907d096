//! Strategy B: chunked memory-mapped copy.
//!
//! The target is resized to the captured source length first, then each
//! page-sized window of the source is mapped read-only alongside the same
//! window of the target mapped writable. Bytes are copied in memory and both
//! mappings are released before the next window is mapped, so at most one
//! pair of mappings exists at any time.

use std::fs::File;
use std::num::NonZeroUsize;

use memmap2::MmapOptions;
use tracing::{debug, trace};

use crate::error::{IoResultExt, TransferError, TransferOperation};
use crate::strategy::{CopyStrategy, SourceInfo};

/// Returns the system memory page size.
#[must_use]
pub fn page_size() -> usize {
    rustix::param::page_size()
}

/// Copies through paired memory mappings, one chunk at a time.
///
/// Chunks default to one memory page. Mapping offsets must be page aligned,
/// so custom chunk sizes are expressed as a whole number of pages.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MmapCopy {
    pages_per_chunk: Option<NonZeroUsize>,
}

impl MmapCopy {
    /// Creates the strategy with one page per chunk.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pages_per_chunk: None,
        }
    }

    /// Creates the strategy with `pages` memory pages per chunk.
    #[must_use]
    pub const fn with_pages_per_chunk(pages: NonZeroUsize) -> Self {
        Self {
            pages_per_chunk: Some(pages),
        }
    }

    /// Chunk size in bytes used for each mapping pair.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        let pages = self.pages_per_chunk.map_or(1, NonZeroUsize::get);
        page_size().saturating_mul(pages)
    }
}

impl CopyStrategy for MmapCopy {
    fn name(&self) -> &'static str {
        "mmap"
    }

    fn transfer(
        &self,
        source: &File,
        target: &File,
        info: &SourceInfo,
    ) -> Result<u64, TransferError> {
        let size = info.len();
        target.set_len(size).during(TransferOperation::Resize)?;
        if info.is_empty() {
            // Zero-length mappings are rejected by mmap(2).
            return Ok(0);
        }

        let chunk_size = self.chunk_size() as u64;
        debug!(target: "tcp::transfer", size, chunk_size, "mapped copy");

        let mut written: u64 = 0;
        while written < size {
            let to_write = chunk_size.min(size - written) as usize;

            // SAFETY: the mapping is read-only and dropped before the next
            // iteration. Truncation of the source by another process while
            // mapped raises SIGBUS, the same contract as any mmap reader.
            let source_map = unsafe {
                MmapOptions::new()
                    .offset(written)
                    .len(to_write)
                    .map(source)
            }
            .during(TransferOperation::SourceMap)?;

            // SAFETY: the target was resized to `size` above, so the window lies
            // inside the file, and no other mapping of it exists in this process.
            let mut target_map = unsafe {
                MmapOptions::new()
                    .offset(written)
                    .len(to_write)
                    .map_mut(target)
            }
            .during(TransferOperation::TargetMap)?;

            target_map.copy_from_slice(&source_map);

            drop(source_map);
            drop(target_map);

            written += to_write as u64;
            trace!(target: "tcp::transfer", chunk = to_write, written, "chunk mapped");
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    fn transfer_with(strategy: MmapCopy, content: &[u8], target: &NamedTempFile) -> u64 {
        let source = create_temp_file(content);
        strategy
            .transfer(
                source.as_file(),
                target.as_file(),
                &SourceInfo::new(content.len() as u64, 4096),
            )
            .unwrap()
    }

    #[test]
    fn page_size_is_power_of_two() {
        assert!(page_size().is_power_of_two());
    }

    #[test]
    fn chunk_size_defaults_to_one_page() {
        assert_eq!(MmapCopy::new().chunk_size(), page_size());
        let four = NonZeroUsize::new(4).unwrap();
        assert_eq!(MmapCopy::with_pages_per_chunk(four).chunk_size(), 4 * page_size());
    }

    #[test]
    fn copies_partial_single_chunk() {
        let target = NamedTempFile::new().unwrap();
        let copied = transfer_with(MmapCopy::new(), b"hello", &target);

        assert_eq!(copied, 5);
        assert_eq!(std::fs::read(target.path()).unwrap(), b"hello");
    }

    #[test]
    fn copies_many_chunks_with_unaligned_tail() {
        let len = page_size() * 5 + 17;
        let content: Vec<u8> = (0..len).map(|i| (i % 253) as u8).collect();
        let target = NamedTempFile::new().unwrap();

        let copied = transfer_with(MmapCopy::new(), &content, &target);

        assert_eq!(copied, len as u64);
        assert_eq!(std::fs::read(target.path()).unwrap(), content);
    }

    #[test]
    fn multi_page_chunks_copy_identically() {
        let len = page_size() * 9 + 1;
        let content: Vec<u8> = (0..len).map(|i| (i % 241) as u8).collect();
        let target = NamedTempFile::new().unwrap();
        let strategy = MmapCopy::with_pages_per_chunk(NonZeroUsize::new(4).unwrap());

        transfer_with(strategy, &content, &target);

        assert_eq!(std::fs::read(target.path()).unwrap(), content);
    }

    #[test]
    fn empty_source_produces_empty_target() {
        let mut target = NamedTempFile::new().unwrap();
        target.write_all(b"stale contents").unwrap();
        target.flush().unwrap();

        let copied = transfer_with(MmapCopy::new(), b"", &target);

        assert_eq!(copied, 0);
        assert_eq!(std::fs::metadata(target.path()).unwrap().len(), 0);
    }

    #[test]
    fn target_is_resized_to_captured_length() {
        let mut target = NamedTempFile::new().unwrap();
        target.write_all(&[0xFF; 10_000]).unwrap();
        target.flush().unwrap();

        transfer_with(MmapCopy::new(), b"short", &target);

        assert_eq!(std::fs::read(target.path()).unwrap(), b"short");
    }

    #[test]
    fn read_only_target_fails_at_resize() {
        let source = create_temp_file(b"abc");
        let target = NamedTempFile::new().unwrap();
        let read_only = File::open(target.path()).unwrap();

        let error = MmapCopy::new()
            .transfer(source.as_file(), &read_only, &SourceInfo::new(3, 4096))
            .unwrap_err();

        assert_eq!(error.operation(), TransferOperation::Resize);
    }
}
