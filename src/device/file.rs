//! File-backed device
//!
//! Emulates an EEPROM over a regular file: opening loads the file into a
//! RAM shadow, reads and writes touch only the shadow, and `commit` writes
//! the whole shadow back with a flush and sync. Until a commit, the file on
//! disk keeps its previous contents.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{ParamError, Result};

use super::Device;

/// File-backed byte-addressable device with a RAM shadow
#[derive(Debug)]
pub struct FileDevice {
    path: PathBuf,
    shadow: Vec<u8>,
    dirty: bool,
}

impl FileDevice {
    /// Open (or create) a backing file and load it into the shadow
    ///
    /// The shadow is exactly `size` bytes: a shorter or missing file is
    /// zero-extended, a longer file is read only up to `size` (the rest is
    /// preserved on disk until the next commit truncates it).
    pub fn open(path: &Path, size: usize) -> Result<Self> {
        let mut shadow = vec![0u8; size];

        if path.exists() {
            let mut file = File::open(path)?;
            let mut existing = Vec::new();
            file.read_to_end(&mut existing)?;
            let n = existing.len().min(size);
            shadow[..n].copy_from_slice(&existing[..n]);
        }

        tracing::debug!(path = %path.display(), size, "file device opened");

        Ok(Self {
            path: path.to_path_buf(),
            shadow,
            dirty: false,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether uncommitted writes are pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Device for FileDevice {
    fn size(&self) -> usize {
        self.shadow.len()
    }

    fn read_byte(&mut self, address: usize) -> Result<u8> {
        self.shadow.get(address).copied().ok_or_else(|| {
            ParamError::DeviceUnavailable(format!(
                "read at {} beyond device size {}",
                address,
                self.shadow.len()
            ))
        })
    }

    fn write_byte(&mut self, address: usize, byte: u8) -> Result<()> {
        match self.shadow.get_mut(address) {
            Some(cell) => {
                *cell = byte;
                self.dirty = true;
                Ok(())
            }
            None => Err(ParamError::DeviceWriteFailure(format!(
                "write at {} beyond device size {}",
                address,
                self.shadow.len()
            ))),
        }
    }

    fn commit(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let write_back = || -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            file.write_all(&self.shadow)?;
            file.flush()?;
            file.sync_all()
        };

        write_back().map_err(|e| {
            ParamError::DeviceWriteFailure(format!(
                "commit to {} failed: {}",
                self.path.display(),
                e
            ))
        })?;

        self.dirty = false;
        tracing::debug!(path = %self.path.display(), len = self.shadow.len(), "shadow committed");
        Ok(())
    }
}
