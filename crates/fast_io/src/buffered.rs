//! Strategy A: streaming copy through a bounded heap buffer.

use std::fs::File;
use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::error::{IoResultExt, TransferError, TransferOperation};
use crate::strategy::{CopyStrategy, SourceInfo};

/// Smallest scratch buffer used, also applied when the filesystem reports a
/// block size of zero.
pub const MIN_BUFFER_SIZE: usize = 512;

/// Largest scratch buffer used regardless of the reported block size.
pub const MAX_BUFFER_SIZE: usize = 1024 * 1024;

/// Clamps a filesystem-reported block size into `[MIN_BUFFER_SIZE, MAX_BUFFER_SIZE]`.
///
/// ```
/// use fast_io::{MAX_BUFFER_SIZE, MIN_BUFFER_SIZE, clamp_buffer_len};
///
/// assert_eq!(clamp_buffer_len(0), MIN_BUFFER_SIZE);
/// assert_eq!(clamp_buffer_len(4096), 4096);
/// assert_eq!(clamp_buffer_len(u64::MAX), MAX_BUFFER_SIZE);
/// ```
#[must_use]
pub fn clamp_buffer_len(block_size: u64) -> usize {
    usize::try_from(block_size)
        .unwrap_or(MAX_BUFFER_SIZE)
        .clamp(MIN_BUFFER_SIZE, MAX_BUFFER_SIZE)
}

/// Reads up to one buffer from the source and writes it to the target until
/// the source reports end of file.
///
/// Each chunk is handed to a single `write` call. A write that accepts fewer
/// bytes than were read aborts the copy with a short-write error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BufferedCopy;

impl BufferedCopy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CopyStrategy for BufferedCopy {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn transfer(
        &self,
        source: &File,
        target: &File,
        info: &SourceInfo,
    ) -> Result<u64, TransferError> {
        let buffer_len = clamp_buffer_len(info.block_size());
        debug!(
            target: "tcp::transfer",
            block_size = info.block_size(),
            buffer_len,
            "streaming copy"
        );
        copy_stream(source, target, buffer_len)
    }
}

fn copy_stream<R, W>(mut reader: R, mut writer: W, buffer_len: usize) -> Result<u64, TransferError>
where
    R: Read,
    W: Write,
{
    let mut buffer = vec![0u8; buffer_len];
    let mut total: u64 = 0;

    loop {
        let read = reader.read(&mut buffer).during(TransferOperation::Read)?;
        if read == 0 {
            break;
        }

        let written = writer
            .write(&buffer[..read])
            .during(TransferOperation::Write)?;
        if written != read {
            return Err(TransferError::short_write(read, written));
        }

        total += read as u64;
        trace!(target: "tcp::transfer", chunk = read, total, "chunk written");
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Seek, SeekFrom};
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        file
    }

    fn read_back(file: &NamedTempFile) -> Vec<u8> {
        std::fs::read(file.path()).unwrap()
    }

    /// Writer that accepts at most `limit` bytes per call.
    struct ShortWriter {
        limit: usize,
        data: Vec<u8>,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn clamp_keeps_reasonable_hints() {
        assert_eq!(clamp_buffer_len(512), 512);
        assert_eq!(clamp_buffer_len(65536), 65536);
    }

    #[test]
    fn clamp_bounds_degenerate_hints() {
        assert_eq!(clamp_buffer_len(0), MIN_BUFFER_SIZE);
        assert_eq!(clamp_buffer_len(1), MIN_BUFFER_SIZE);
        assert_eq!(clamp_buffer_len(64 * 1024 * 1024), MAX_BUFFER_SIZE);
    }

    #[test]
    fn copies_small_file() {
        let content = b"hello";
        let source = create_temp_file(content);
        let target = NamedTempFile::new().unwrap();

        let copied = BufferedCopy
            .transfer(
                source.as_file(),
                target.as_file(),
                &SourceInfo::new(content.len() as u64, 4096),
            )
            .unwrap();

        assert_eq!(copied, 5);
        assert_eq!(read_back(&target), content);
    }

    #[test]
    fn copies_across_many_buffers_in_order() {
        // 1000 minimum-sized buffers plus a partial tail.
        let content: Vec<u8> = (0..512_123u32).map(|i| ((i * 7 + 13) % 251) as u8).collect();
        let source = create_temp_file(&content);
        let target = NamedTempFile::new().unwrap();

        let copied = BufferedCopy
            .transfer(
                source.as_file(),
                target.as_file(),
                &SourceInfo::new(content.len() as u64, 0),
            )
            .unwrap();

        assert_eq!(copied, content.len() as u64);
        assert_eq!(read_back(&target), content);
    }

    #[test]
    fn empty_source_produces_empty_target() {
        let source = create_temp_file(b"");
        let target = NamedTempFile::new().unwrap();

        let copied = BufferedCopy
            .transfer(source.as_file(), target.as_file(), &SourceInfo::new(0, 4096))
            .unwrap();

        assert_eq!(copied, 0);
        assert!(read_back(&target).is_empty());
    }

    #[test]
    fn short_write_is_fatal() {
        let content = vec![0xAB; 2048];
        let mut writer = ShortWriter {
            limit: 100,
            data: Vec::new(),
        };

        let error = copy_stream(content.as_slice(), &mut writer, 1024).unwrap_err();

        assert_eq!(error.operation(), TransferOperation::Write);
        assert_eq!(error.io_error().kind(), io::ErrorKind::WriteZero);
        // The partial chunk is not retried or rolled back.
        assert_eq!(writer.data.len(), 100);
    }

    #[test]
    fn read_error_is_reported() {
        let error = copy_stream(FailingReader, Vec::new(), 512).unwrap_err();

        assert_eq!(error.operation(), TransferOperation::Read);
        assert!(error.to_string().contains("device unplugged"));
    }
}
