//! Named-resource lookup across the PJL volumes.
//!
//! PDL interpreters ask for resources (fonts, macros) by bare file name. The
//! locator walks volume `0:` and then `1:` depth-first and hands back the
//! first file whose name matches.

use crate::error::SandboxError;
use crate::sandbox::Volumes;
use pjl_traits::{HostFilesystem, OpenMode};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub struct ResourceLocator<'a> {
    fs: &'a dyn HostFilesystem,
    volumes: &'a Volumes,
}

impl<'a> ResourceLocator<'a> {
    pub fn new(fs: &'a dyn HostFilesystem, volumes: &'a Volumes) -> Self {
        Self { fs, volumes }
    }

    /// Host path of the first file named `name`, if any.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.volumes
            .roots()
            .into_iter()
            .find_map(|root| self.search(Path::new(root), name))
    }

    fn search(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        // Unreadable directories are simply not searched.
        let entries = self.fs.read_dir(dir).ok()?;
        for entry in entries {
            if entry.is_dir {
                if let Some(found) = self.search(&entry.path, name) {
                    return Some(found);
                }
            } else if entry.file_name() == Some(name) {
                return Some(entry.path);
            }
        }
        None
    }

    /// Size of the named resource. Missing and empty resources both report 0.
    pub fn resource_size(&self, name: &str) -> u64 {
        let Some(path) = self.find(name) else {
            return 0;
        };
        self.fs
            .open(&path, OpenMode::Read)
            .and_then(|mut file| file.seek(SeekFrom::End(0)))
            .unwrap_or(0)
    }

    /// Appends the named resource's bytes to `out` and returns how many were
    /// read. A missing resource reads as zero bytes.
    pub fn read_resource(&self, name: &str, out: &mut Vec<u8>) -> Result<usize, SandboxError> {
        let Some(path) = self.find(name) else {
            return Ok(0);
        };
        let mut file = self.fs.open(&path, OpenMode::Read)?;
        let size = file.seek(SeekFrom::End(0))?;
        file.rewind()?;

        let start = out.len();
        file.take(size).read_to_end(out)?;
        let actual = (out.len() - start) as u64;
        if actual != size {
            out.truncate(start);
            return Err(SandboxError::Truncated {
                name: name.to_string(),
                expected: size,
                actual,
            });
        }
        Ok(out.len() - start)
    }
}
