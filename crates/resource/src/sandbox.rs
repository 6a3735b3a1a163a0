//! The PJL pseudo-filesystem.
//!
//! PJL file commands address two volumes, `0:` and `1:`. Each volume is a
//! host directory; every command path is translated onto one of them and
//! checked before any host call is made.
//!
//! # Security
//!
//! A translated path must stay under one of the two roots. Paths containing
//! `..` components are rejected outright so `0:\..\..\etc` cannot climb out.

use crate::error::SandboxError;
use crate::locator::ResourceLocator;
use pjl_traits::{HostFile, HostFilesystem, OpenMode};
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path};
use std::sync::Arc;

/// Longest accepted PJL path name, in bytes.
pub const MAX_PATH_LEN: usize = 1023;

/// Host roots for the two PJL volumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volumes {
    pub volume_0: String,
    pub volume_1: String,
}

impl Volumes {
    pub fn new(volume_0: impl Into<String>, volume_1: impl Into<String>) -> Self {
        Self {
            volume_0: volume_0.into(),
            volume_1: volume_1.into(),
        }
    }

    /// Roots in search order.
    pub fn roots(&self) -> [&str; 2] {
        [&self.volume_0, &self.volume_1]
    }

    /// Translates a (possibly quoted) PJL path into a host path.
    ///
    /// `"0:\dir\file"` becomes `<volume_0>/dir/file`. Anything that does not
    /// start with `0:` or `1:` yields `None`.
    pub fn translate(&self, pjl_path: &str) -> Option<String> {
        let path = pjl_path.strip_prefix('"').unwrap_or(pjl_path);
        let (root, rest) = if let Some(rest) = path.strip_prefix("0:") {
            (&self.volume_0, rest)
        } else if let Some(rest) = path.strip_prefix("1:") {
            (&self.volume_1, rest)
        } else {
            return None;
        };

        let rest: String = rest
            .chars()
            .filter(|&c| c != '"')
            .map(|c| if c == '\\' { '/' } else { c })
            .collect();

        let mut host = root.clone();
        if !rest.is_empty() && !rest.starts_with('/') && !host.ends_with('/') {
            host.push('/');
        }
        host.push_str(&rest);
        Some(host)
    }

    /// Returns `true` if `host_path` lies under one of the volume roots.
    pub fn contains(&self, host_path: &str) -> bool {
        let under_root = self.roots().iter().any(|root| {
            host_path
                .strip_prefix(root)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || root.ends_with('/'))
        });
        under_root
            && !Path::new(host_path)
                .components()
                .any(|c| matches!(c, Component::ParentDir))
    }
}

impl Default for Volumes {
    fn default() -> Self {
        Self::new("/tmp/pjl0", "/tmp/pjl1")
    }
}

/// Whether a download replaces or extends the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// `FSDOWNLOAD`
    Download,
    /// `FSAPPEND`
    Append,
}

/// A download that is still waiting for raw bytes from the stream.
struct PendingWrite {
    path: String,
    file: Box<dyn HostFile>,
    remaining: u64,
}

impl fmt::Debug for PendingWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingWrite")
            .field("path", &self.path)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Guarded access to the PJL volumes.
///
/// At most one write is in flight at a time. Dropping the sandbox closes any
/// half-finished download.
#[derive(Debug)]
pub struct Sandbox {
    fs: Arc<dyn HostFilesystem>,
    volumes: Volumes,
    pending: Option<PendingWrite>,
}

impl Sandbox {
    pub fn new(fs: Arc<dyn HostFilesystem>, volumes: Volumes) -> Self {
        Self {
            fs,
            volumes,
            pending: None,
        }
    }

    pub fn volumes(&self) -> &Volumes {
        &self.volumes
    }

    pub fn filesystem(&self) -> &dyn HostFilesystem {
        self.fs.as_ref()
    }

    /// A locator searching this sandbox's volumes.
    pub fn locator(&self) -> ResourceLocator<'_> {
        ResourceLocator::new(self.fs.as_ref(), &self.volumes)
    }

    /// Returns `true` while a download is waiting for data.
    pub fn is_writing(&self) -> bool {
        self.pending.is_some()
    }

    /// Bytes still expected by the in-flight download, or 0.
    pub fn remaining(&self) -> u64 {
        self.pending.as_ref().map_or(0, |p| p.remaining)
    }

    /// Checks that a host path may be touched right now.
    pub fn guard(&self, host_path: &str, disk_locked: bool) -> Result<(), SandboxError> {
        if !self.volumes.contains(host_path) {
            log::warn!("illegal path name {}", host_path);
            return Err(SandboxError::IllegalPath(host_path.to_string()));
        }
        if self.pending.is_some() {
            return Err(SandboxError::WriteInFlight);
        }
        if disk_locked {
            return Err(SandboxError::DiskLocked);
        }
        Ok(())
    }

    fn resolve(&self, pjl_path: &str, disk_locked: bool) -> Result<String, SandboxError> {
        let host_path = self
            .volumes
            .translate(pjl_path)
            .ok_or_else(|| SandboxError::IllegalPath(pjl_path.to_string()))?;
        self.guard(&host_path, disk_locked)?;
        Ok(host_path)
    }

    /// Opens the target of `FSDOWNLOAD`/`FSAPPEND` and arms the byte counter.
    pub fn begin_write(
        &mut self,
        pjl_path: &str,
        size: u64,
        kind: WriteKind,
        disk_locked: bool,
    ) -> Result<(), SandboxError> {
        let host_path = self.resolve(pjl_path, disk_locked)?;
        let path = Path::new(&host_path);
        if kind == WriteKind::Download && self.fs.exists(path) {
            log::warn!("file exists, overwriting {}", host_path);
        }
        let mode = match kind {
            WriteKind::Download => OpenMode::Truncate,
            WriteKind::Append => OpenMode::Append,
        };
        let file = self.fs.open(path, mode).inspect_err(|e| {
            log::warn!("opening {} for writing failed: {}", host_path, e);
        })?;

        if size == 0 {
            log::debug!("zero-length write to {} completed", host_path);
            return Ok(());
        }
        log::debug!("expecting {} bytes for {}", size, host_path);
        self.pending = Some(PendingWrite {
            path: host_path,
            file,
            remaining: size,
        });
        Ok(())
    }

    /// Siphons stream bytes into the in-flight download.
    ///
    /// Returns how many bytes of `data` were consumed. The file is closed as
    /// soon as the counter reaches zero, or immediately on a failed write.
    pub fn write_pending(&mut self, data: &[u8]) -> Result<usize, SandboxError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(0);
        };
        let count = usize::try_from(pending.remaining).map_or(data.len(), |r| r.min(data.len()));

        if let Err(source) = pending.file.write_all(&data[..count]) {
            let path = std::mem::take(&mut pending.path);
            self.pending = None;
            return Err(SandboxError::ShortWrite { path, source });
        }
        pending.remaining -= count as u64;

        if pending.remaining == 0 {
            let flushed = pending.file.flush();
            let path = std::mem::take(&mut pending.path);
            self.pending = None;
            if let Err(source) = flushed {
                return Err(SandboxError::ShortWrite { path, source });
            }
            log::info!("download of {} complete", path);
        }
        Ok(count)
    }

    /// `FSDELETE`
    pub fn delete(&mut self, pjl_path: &str, disk_locked: bool) -> Result<(), SandboxError> {
        let host_path = self.resolve(pjl_path, disk_locked)?;
        self.fs.remove_file(Path::new(&host_path))?;
        Ok(())
    }

    /// `FSMKDIR`
    pub fn make_dir(&mut self, pjl_path: &str, disk_locked: bool) -> Result<(), SandboxError> {
        let host_path = self.resolve(pjl_path, disk_locked)?;
        self.fs.create_dir(Path::new(&host_path))?;
        Ok(())
    }

    /// `FSINIT`: creates the directory backing a volume. An existing volume
    /// is left as it is.
    pub fn init_volume(&mut self, pjl_volume: &str, disk_locked: bool) -> Result<(), SandboxError> {
        let host_path = self.resolve(pjl_volume, disk_locked)?;
        match self.fs.create_dir(Path::new(&host_path)) {
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            other => Ok(other?),
        }
    }

    /// `FSDIRLIST`: names of the entries in a volume directory.
    pub fn list_dir(&self, pjl_path: &str, disk_locked: bool) -> Result<Vec<String>, SandboxError> {
        let host_path = self.resolve(pjl_path, disk_locked)?;
        let entries = self.fs.read_dir(Path::new(&host_path))?;
        Ok(entries
            .iter()
            .filter_map(|e| e.file_name().map(str::to_string))
            .collect())
    }
}
