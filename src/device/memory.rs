//! In-memory device
//!
//! RAM-backed device, instrumented with write and commit counters so tests
//! can assert the wear properties directly: an unchanged save must cost
//! zero byte writes and zero commits.

use crate::error::{ParamError, Result};

use super::Device;

/// RAM-backed byte-addressable device
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    cells: Vec<u8>,
    byte_writes: u64,
    commits: u64,
}

impl MemoryDevice {
    /// Create a device of `size` zeroed bytes
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size],
            byte_writes: 0,
            commits: 0,
        }
    }

    /// Create a device preloaded with the given contents
    pub fn from_bytes(cells: impl Into<Vec<u8>>) -> Self {
        Self {
            cells: cells.into(),
            byte_writes: 0,
            commits: 0,
        }
    }

    /// Total byte writes since creation
    pub fn byte_writes(&self) -> u64 {
        self.byte_writes
    }

    /// Total commits since creation
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Current cell contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }
}

impl Device for MemoryDevice {
    fn size(&self) -> usize {
        self.cells.len()
    }

    fn read_byte(&mut self, address: usize) -> Result<u8> {
        self.cells.get(address).copied().ok_or_else(|| {
            ParamError::DeviceUnavailable(format!(
                "read at {} beyond device size {}",
                address,
                self.cells.len()
            ))
        })
    }

    fn write_byte(&mut self, address: usize, byte: u8) -> Result<()> {
        match self.cells.get_mut(address) {
            Some(cell) => {
                *cell = byte;
                self.byte_writes += 1;
                Ok(())
            }
            None => Err(ParamError::DeviceWriteFailure(format!(
                "write at {} beyond device size {}",
                address,
                self.cells.len()
            ))),
        }
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }
}
