//! scratch/mod.rs
//! Scratch Storage Allocator.
//!
//! Each session gets its own uniquely named file, opened read+write so the
//! engine can append to it and the session can rewind and drain it later.
//!
//! Naming: `{prefix}-{xxh64(uuid v7):016x}`. UUID v7 generation is safe to
//! call from any thread without coordination; `create_new` turns a rare name
//! collision into a retry instead of a shared file.
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;
use xxhash_rust::xxh64::xxh64;

use crate::constants::MAX_SCRATCH_ATTEMPTS;
use crate::types::BzipError;

/// Build a candidate scratch file name from a fresh unique token.
pub fn scratch_name(prefix: &str) -> String {
    let token = Uuid::now_v7();
    format!("{}-{:016x}", prefix, xxh64(token.as_bytes(), 0))
}

/// Owned scratch file. Removed from disk on drop unless `remove` already ran.
#[derive(Debug)]
pub struct ScratchFile {
    file: File,
    path: PathBuf,
    removed: bool,
}

impl ScratchFile {
    /// Create a new, empty, uniquely named file in `dir`.
    pub fn allocate(dir: &Path, prefix: &str) -> Result<Self, BzipError> {
        let mut last_err = None;

        for _ in 0..MAX_SCRATCH_ATTEMPTS {
            let path = dir.join(scratch_name(prefix));
            match OpenOptions::new().read(true).write(true).create_new(true).open(&path) {
                Ok(file) => {
                    log::trace!("scratch allocated: {}", path.display());
                    return Ok(Self { file, path, removed: false });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("scratch name collision at {}, retrying", path.display());
                    last_err = Some(e);
                }
                Err(e) => {
                    return Err(BzipError::ScratchAllocationFailed { dir: dir.to_path_buf(), source: e });
                }
            }
        }

        Err(BzipError::ScratchAllocationFailed {
            dir: dir.to_path_buf(),
            source: last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::AlreadyExists, "no free scratch name")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// Duplicate the descriptor. The clone shares the file offset.
    pub fn share(&self) -> io::Result<File> {
        self.file.try_clone()
    }

    /// Close and delete the file, reporting failure.
    pub fn remove(mut self) -> Result<(), BzipError> {
        self.removed = true;
        let path = std::mem::take(&mut self.path);
        drop(self);
        fs::remove_file(&path).map_err(|source| BzipError::ScratchCleanupFailed { path, source })
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("scratch cleanup failed for {}: {e}", self.path.display());
            }
        }
    }
}
