//! Wear-aware record I/O
//!
//! EEPROM-class media wears out per written cell, so a save must not cost a
//! full window of writes when nothing changed. Every byte is read first and
//! written only if it differs; the commit is issued only when the window is
//! actually dirty. Saving the same configuration twice costs one full pass
//! of reads and zero writes.

use crate::device::Device;
use crate::error::Result;

/// Read `length` consecutive bytes starting at `base_address`
///
/// No interpretation; checksum and token validation belong to the codec.
pub fn read_record<D: Device>(device: &mut D, base_address: usize, length: usize) -> Result<Vec<u8>> {
    let mut blob = Vec::with_capacity(length);
    for offset in 0..length {
        blob.push(device.read_byte(base_address + offset)?);
    }
    Ok(blob)
}

/// Write a blob at `base_address`, touching only cells that differ
///
/// Returns whether any byte changed. The commit is issued only in that
/// case; an entirely unchanged window leaves the device untouched.
pub fn write_record<D: Device>(device: &mut D, base_address: usize, blob: &[u8]) -> Result<bool> {
    let mut changed = false;

    for (offset, &byte) in blob.iter().enumerate() {
        let address = base_address + offset;
        let current = device.read_byte(address)?;
        if current != byte {
            device.write_byte(address, byte)?;
            changed = true;
        }
    }

    if changed {
        device.commit()?;
        tracing::debug!(base_address, len = blob.len(), "record committed");
    } else {
        tracing::trace!(base_address, len = blob.len(), "record unchanged, commit skipped");
    }

    Ok(changed)
}
