//! Pair record codec
//!
//! Encoding and decoding between an ordered pair collection and the on-media
//! record window. Both directions are pure transformations over in-memory
//! buffers; device I/O is the store layer's concern.

use bytes::{Bytes, BytesMut};

use crate::checksum::crc8;
use crate::error::{ParamError, Result};
use crate::map::Pair;

use super::{ensure_no_nul, overhead, token_matches, CHECKSUM_SIZE, COUNT_SIZE};

/// Bytes the record for `token` and `pairs` actually uses, checksum included
pub fn encoded_len(token: &str, pairs: &[Pair]) -> usize {
    overhead(token.len()) + pairs.iter().map(Pair::entry_size).sum::<usize>()
}

/// Encode a token and ordered pairs into a capacity-sized record blob
///
/// The blob is exactly `capacity` bytes: used prefix, zero padding, trailing
/// checksum. Fails with `LengthExceeded` before a single byte is laid out if
/// the record cannot fit.
pub fn encode(token: &str, pairs: &[Pair], capacity: usize) -> Result<Bytes> {
    let needed = encoded_len(token, pairs);
    if needed > capacity {
        return Err(ParamError::LengthExceeded { needed, capacity });
    }
    if pairs.len() > u16::MAX as usize {
        return Err(ParamError::Format(format!(
            "{} pairs exceed the u16 count field",
            pairs.len()
        )));
    }

    ensure_no_nul("token", token.as_bytes())?;
    for pair in pairs {
        ensure_no_nul("key", &pair.key)?;
        ensure_no_nul("value", &pair.value)?;
    }

    // Zero-filled window: NUL terminators and tail padding come for free,
    // only the used fields are copied in.
    let mut buf = BytesMut::zeroed(capacity);
    let mut pos = 0;

    buf[pos..pos + token.len()].copy_from_slice(token.as_bytes());
    pos += token.len() + 1;

    buf[pos..pos + COUNT_SIZE].copy_from_slice(&(pairs.len() as u16).to_le_bytes());
    pos += COUNT_SIZE;

    for pair in pairs {
        buf[pos..pos + pair.key.len()].copy_from_slice(&pair.key);
        pos += pair.key.len() + 1;
        buf[pos..pos + pair.value.len()].copy_from_slice(&pair.value);
        pos += pair.value.len() + 1;
    }

    let crc = crc8(&buf[..capacity - CHECKSUM_SIZE]);
    buf[capacity - CHECKSUM_SIZE] = crc;

    Ok(buf.freeze())
}

/// Decode a record window back into its ordered pairs
///
/// Validation order: checksum first (nothing in the window is trusted until
/// the CRC verifies), then token, then the pair walk. `ChecksumMismatch` and
/// `TokenMismatch` are soft: they mean "no valid record here".
pub fn decode(blob: &[u8], expected_token: &str) -> Result<Vec<Pair>> {
    let min = overhead(expected_token.len());
    if blob.len() < min {
        return Err(ParamError::Format(format!(
            "record window of {} bytes is below the {} byte minimum",
            blob.len(),
            min
        )));
    }

    let stored = blob[blob.len() - 1];
    let computed = crc8(&blob[..blob.len() - 1]);
    if stored != computed {
        return Err(ParamError::ChecksumMismatch { stored, computed });
    }

    if !token_matches(expected_token.as_bytes(), blob) {
        return Err(ParamError::TokenMismatch);
    }

    let mut pos = expected_token.len() + 1;
    let data_end = blob.len() - CHECKSUM_SIZE;

    let count = u16::from_le_bytes([blob[pos], blob[pos + 1]]) as usize;
    pos += COUNT_SIZE;

    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let key = read_field(blob, &mut pos, data_end)?;
        let value = read_field(blob, &mut pos, data_end)?;
        pairs.push(Pair { key, value });
    }

    Ok(pairs)
}

/// Read one NUL-terminated field, advancing the cursor past the terminator
///
/// A missing terminator before `end` means the count field promised more
/// pairs than the window holds, malformed despite a passing checksum.
fn read_field(blob: &[u8], pos: &mut usize, end: usize) -> Result<Vec<u8>> {
    let start = *pos;
    let len = blob[start..end]
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| ParamError::Format("record window ended inside a field".to_string()))?;
    *pos = start + len + 1;
    Ok(blob[start..start + len].to_vec())
}
