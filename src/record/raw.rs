//! Raw block records
//!
//! Token-prefixed, checksum-trailed persistence of an opaque caller-owned
//! payload, for callers that keep their configuration in a fixed binary
//! block rather than named pairs. Same capacity window, checksum placement,
//! and token rules as the pair codec; the payload bytes are not interpreted
//! and may contain NUL.
//!
//! ## Layout
//! ```text
//! [token bytes][0x00][payload bytes][zero padding ...][checksum]
//! ```

use bytes::{Bytes, BytesMut};

use crate::checksum::crc8;
use crate::error::{ParamError, Result};

use super::{ensure_no_nul, token_matches, CHECKSUM_SIZE};

/// Encode an opaque payload into a capacity-sized record blob
pub fn encode_raw(token: &str, payload: &[u8], capacity: usize) -> Result<Bytes> {
    let needed = token.len() + 1 + payload.len() + CHECKSUM_SIZE;
    if needed > capacity {
        return Err(ParamError::LengthExceeded { needed, capacity });
    }
    ensure_no_nul("token", token.as_bytes())?;

    let mut buf = BytesMut::zeroed(capacity);
    let payload_start = token.len() + 1;

    buf[..token.len()].copy_from_slice(token.as_bytes());
    buf[payload_start..payload_start + payload.len()].copy_from_slice(payload);

    let crc = crc8(&buf[..capacity - CHECKSUM_SIZE]);
    buf[capacity - CHECKSUM_SIZE] = crc;

    Ok(buf.freeze())
}

/// Decode a raw record window back into its payload bytes
///
/// Returns the whole payload window between the token terminator and the
/// checksum byte. The caller owns the payload length and ignores trailing
/// zeros itself; the codec cannot tell payload from padding.
pub fn decode_raw(blob: &[u8], expected_token: &str) -> Result<Vec<u8>> {
    let min = expected_token.len() + 1 + CHECKSUM_SIZE;
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

    let payload_start = expected_token.len() + 1;
    Ok(blob[payload_start..blob.len() - CHECKSUM_SIZE].to_vec())
}
