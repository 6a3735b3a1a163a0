//! HostFilesystem trait for abstracting host file access.
//!
//! The PJL sandbox and resource lookup never touch `std::fs` directly; the
//! embedding system hands in an implementation of [`HostFilesystem`].

use std::fmt::Debug;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

/// An open host file. Blanket-implemented for anything readable, writable
/// and seekable, so `std::fs::File` qualifies as-is.
pub trait HostFile: Read + Write + Seek + Debug {}

impl<T: Read + Write + Seek + Debug> HostFile for T {}

/// How a host file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Open an existing file for reading.
    Read,
    /// Create the file, truncating any previous contents.
    Truncate,
    /// Create the file if needed and position writes at its end.
    Append,
}

/// One entry produced by directory enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    /// The final path component, if it is valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Host filesystem primitives used by the PJL parser.
///
/// # Implementations
///
/// - `StdFilesystem` in `pjl-resource`: backed by `std::fs`
pub trait HostFilesystem: Send + Sync + Debug {
    /// Opens a file in the given mode.
    fn open(&self, path: &Path, mode: OpenMode) -> io::Result<Box<dyn HostFile>>;

    /// Lists the entries of a directory, excluding `.` and `..`.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Creates a single directory.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Removes a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Returns `true` if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns a human-readable name for this filesystem (for logging/debugging).
    fn name(&self) -> &'static str;
}
