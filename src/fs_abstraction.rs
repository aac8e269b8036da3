//! Filesystem abstraction layer for testability
//!
//! The blacklist store only needs three things from the filesystem: a
//! buffered reader, an append, and an all-or-nothing replace. Putting them
//! behind a trait lets tests simulate write failures that a real temporary
//! directory cannot produce reliably (e.g. when the test runs as root).

use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

#[cfg(test)]
use mockall::automock;

/// Trait abstracting the filesystem operations used by the blacklist store.
///
/// # Example (testing)
/// ```ignore
/// use blacklist::fs_abstraction::MockFileSystem;
///
/// let mut mock_fs = MockFileSystem::new();
/// mock_fs.expect_replace()
///     .returning(|_, _| Err(io::Error::new(io::ErrorKind::Other, "disk full")));
/// ```
#[cfg_attr(test, automock)]
pub trait FileSystem: Send + Sync {
    /// Open a file for buffered reading.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send>>;

    /// Append bytes to a file, creating it if it doesn't exist.
    ///
    /// If the file's last line is unterminated, a newline is written first.
    fn append(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Replace a file's contents atomically.
    ///
    /// On error the previous contents must still be in place.
    fn replace(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Real filesystem implementation using std::fs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
        let file = std::fs::File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn append(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        file.write_all(contents)?;
        file.flush()
    }

    fn replace(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        // Temporary file in the same directory so the rename stays on one filesystem
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent)?;

        temp_file.write_all(contents)?;
        temp_file.as_file().sync_all()?;

        // Keep the original file mode (blacklist files are often 0600)
        if let Ok(metadata) = std::fs::metadata(path) {
            temp_file
                .as_file()
                .set_permissions(metadata.permissions())?;
        }

        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    fn read_all(fs: &RealFileSystem, path: &Path) -> String {
        let mut reader = fs.open_read(path).unwrap();
        let mut content = String::new();
        reader.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_real_fs_append_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("blacklist-ip");

        let fs = RealFileSystem;
        fs.append(&file_path, b"10.0.0.1\n").unwrap();
        fs.append(&file_path, b"10.0.0.2\n").unwrap();

        assert_eq!(read_all(&fs, &file_path), "10.0.0.1\n10.0.0.2\n");
    }

    #[test]
    fn test_real_fs_append_terminates_last_line() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("blacklist-ip");
        std::fs::write(&file_path, b"1.1.1.1").unwrap();

        let fs = RealFileSystem;
        fs.append(&file_path, b"2.2.2.2\n").unwrap();

        assert_eq!(read_all(&fs, &file_path), "1.1.1.1\n2.2.2.2\n");
    }

    #[test]
    fn test_real_fs_append_to_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("blacklist-ip");
        std::fs::write(&file_path, b"").unwrap();

        let fs = RealFileSystem;
        fs.append(&file_path, b"2.2.2.2\n").unwrap();

        assert_eq!(read_all(&fs, &file_path), "2.2.2.2\n");
    }

    #[test]
    fn test_real_fs_replace() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("blacklist-ip");

        let fs = RealFileSystem;
        fs.append(&file_path, b"old\n").unwrap();
        fs.replace(&file_path, b"new\n").unwrap();

        assert_eq!(read_all(&fs, &file_path), "new\n");
    }

    #[test]
    fn test_real_fs_replace_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("blacklist-ip");

        let fs = RealFileSystem;
        fs.replace(&file_path, b"10.0.0.1\n").unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_real_fs_replace_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("blacklist-ip");
        std::fs::write(&file_path, b"10.0.0.1\n").unwrap();
        std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o640)).unwrap();

        let fs = RealFileSystem;
        fs.replace(&file_path, b"10.0.0.2\n").unwrap();

        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_real_fs_replace_into_missing_dir_fails() {
        let fs = RealFileSystem;
        let result = fs.replace(Path::new("/nonexistent/path/blacklist-ip"), b"x\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_real_fs_open_nonexistent() {
        let fs = RealFileSystem;
        let result = fs.open_read(Path::new("/nonexistent/path/file.txt"));
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_real_fs_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RealFileSystem>();
    }

    #[test]
    fn test_mock_fs_error_simulation() {
        let mut mock = MockFileSystem::new();
        mock.expect_replace()
            .returning(|_, _| Err(io::Error::new(ErrorKind::PermissionDenied, "access denied")));

        let result = mock.replace(Path::new("/any/path"), b"data");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::PermissionDenied);
    }
}
