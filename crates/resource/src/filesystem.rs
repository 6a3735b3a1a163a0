//! `std::fs`-backed host filesystem for native platforms.

use pjl_traits::{DirEntry, HostFile, HostFilesystem, OpenMode};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// A host filesystem that forwards every primitive to `std::fs`.
///
/// Paths are used exactly as given; confinement to the PJL volumes is the
/// job of [`crate::Sandbox`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFilesystem;

impl StdFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl HostFilesystem for StdFilesystem {
    fn open(&self, path: &Path, mode: OpenMode) -> io::Result<Box<dyn HostFile>> {
        let file = match mode {
            OpenMode::Read => File::open(path)?,
            OpenMode::Truncate => File::create(path)?,
            OpenMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
        };
        Ok(Box::new(file))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let path = entry?.path();
            let is_dir = path.is_dir();
            entries.push(DirEntry { path, is_dir });
        }
        // Enumeration order is host-defined; sort so lookups are repeatable.
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn name(&self) -> &'static str {
        "StdFilesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom, Write};
    use tempfile::tempdir;

    #[test]
    fn test_std_filesystem_truncate_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let fs = StdFilesystem::new();

        fs.open(&path, OpenMode::Truncate)
            .unwrap()
            .write_all(b"Hello, World!")
            .unwrap();

        let mut data = String::new();
        fs.open(&path, OpenMode::Read)
            .unwrap()
            .read_to_string(&mut data)
            .unwrap();
        assert_eq!(data, "Hello, World!");
    }

    #[test]
    fn test_std_filesystem_append_keeps_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.bin");
        let fs = StdFilesystem::new();

        fs.open(&path, OpenMode::Truncate).unwrap().write_all(b"abc").unwrap();
        fs.open(&path, OpenMode::Append).unwrap().write_all(b"def").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"abcdef");
    }

    #[test]
    fn test_std_filesystem_seek_reports_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sized.bin");
        std::fs::write(&path, vec![7u8; 300]).unwrap();

        let mut file = StdFilesystem::new().open(&path, OpenMode::Read).unwrap();
        assert_eq!(file.seek(SeekFrom::End(0)).unwrap(), 300);
    }

    #[test]
    fn test_std_filesystem_read_dir_marks_directories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("file"), b"").unwrap();

        let entries = StdFilesystem::new().read_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name(), Some("file"));
        assert!(!entries[0].is_dir);
        assert_eq!(entries[1].file_name(), Some("sub"));
        assert!(entries[1].is_dir);
    }

    #[test]
    fn test_std_filesystem_mkdir_and_unlink() {
        let dir = tempdir().unwrap();
        let fs = StdFilesystem::new();
        let sub = dir.path().join("fonts");
        fs.create_dir(&sub).unwrap();
        assert!(fs.exists(&sub));

        let file = sub.join("f");
        std::fs::write(&file, b"x").unwrap();
        fs.remove_file(&file).unwrap();
        assert!(!fs.exists(&file));
    }

    #[test]
    fn test_std_filesystem_open_missing_fails() {
        let dir = tempdir().unwrap();
        let result = StdFilesystem::new().open(&dir.path().join("nope"), OpenMode::Read);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
