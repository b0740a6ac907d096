use std::fs::{self, Metadata};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use fast_io::SourceInfo;

use super::error::{LocalCopyError, LocalCopyErrorKind};

/// Mask selecting permission, setuid, setgid and sticky bits from `st_mode`.
const MODE_BITS: u32 = 0o7777;

/// Device and inode pair identifying a file's underlying storage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FileIdentity {
    dev: u64,
    ino: u64,
}

impl FileIdentity {
    /// Extracts the identity from `metadata`.
    #[must_use]
    pub fn of(metadata: &Metadata) -> Self {
        Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        }
    }
}

/// A source path verified to name a regular file, with its status snapshot.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    metadata: Metadata,
}

impl SourceFile {
    /// Queries `path` (following symbolic links) and requires a regular file.
    pub fn inspect(path: impl Into<PathBuf>) -> Result<Self, LocalCopyError> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(LocalCopyErrorKind::SourceStatus)?;
        if !metadata.is_file() {
            return Err(LocalCopyErrorKind::SourceNotRegular.into());
        }
        Ok(Self { path, metadata })
    }

    /// The source path as given.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Device and inode of the source.
    #[must_use]
    pub fn identity(&self) -> FileIdentity {
        FileIdentity::of(&self.metadata)
    }

    /// Size and block-size hint handed to the copy strategy.
    #[must_use]
    pub fn info(&self) -> SourceInfo {
        SourceInfo::from_metadata(&self.metadata)
    }

    /// Permission bits used as the creation mode of a new target.
    #[must_use]
    pub fn mode(&self) -> u32 {
        self.metadata.mode() & MODE_BITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn regular_file_is_accepted() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, b"hello").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        let source = SourceFile::inspect(&path).unwrap();

        assert_eq!(source.path(), path);
        assert_eq!(source.info().len(), 5);
        assert_eq!(source.mode(), 0o640);
    }

    #[test]
    fn missing_file_reports_status_error() {
        let temp = tempfile::tempdir().unwrap();
        let error = SourceFile::inspect(temp.path().join("missing.txt")).unwrap_err();

        assert!(matches!(error.kind(), LocalCopyErrorKind::SourceStatus(_)));
        assert!(error.to_string().starts_with("source is not a regular file"));
    }

    #[test]
    fn directory_is_not_regular() {
        let temp = tempfile::tempdir().unwrap();
        let error = SourceFile::inspect(temp.path()).unwrap_err();

        assert!(matches!(error.kind(), LocalCopyErrorKind::SourceNotRegular));
    }

    #[test]
    fn hard_links_share_identity() {
        let temp = tempfile::tempdir().unwrap();
        let original = temp.path().join("original");
        let link = temp.path().join("link");
        fs::write(&original, b"x").unwrap();
        fs::hard_link(&original, &link).unwrap();

        let a = SourceFile::inspect(&original).unwrap().identity();
        let b = FileIdentity::of(&fs::metadata(&link).unwrap());
        assert_eq!(a, b);
    }
}
