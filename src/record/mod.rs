//! Record Module
//!
//! Binary persistence format for one configuration record. A record always
//! occupies its full declared capacity on the device; the used prefix is
//! followed by zero padding, and the final byte of the window is the CRC-8
//! of everything before it.
//!
//! ## Record Layout (little-endian multi-byte fields)
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Token (variable) | 0x00                                  │
//! ├──────────────────────────────────────────────────────────┤
//! │ PairCount: u16 LE (2)                                    │
//! ├──────────────────────────────────────────────────────────┤
//! │ [Key bytes][0x00][Value bytes][0x00]                     │
//! │   ... repeated PairCount times, insertion order ...      │
//! ├──────────────────────────────────────────────────────────┤
//! │ Zero padding up to capacity − 1                          │
//! ├──────────────────────────────────────────────────────────┤
//! │ Checksum: CRC-8 over bytes [0, capacity − 1) (1)         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A record whose checksum or token does not verify is treated as absent,
//! never as a different, valid configuration.

mod codec;
mod raw;

pub use codec::{decode, encode, encoded_len};
pub use raw::{decode_raw, encode_raw};

// =============================================================================
// Shared Constants (used by both codecs and the store layer)
// =============================================================================

/// Size of the pair-count field
pub(crate) const COUNT_SIZE: usize = 2;

/// Size of the trailing checksum field
pub(crate) const CHECKSUM_SIZE: usize = 1;

/// Fixed bytes a pair record needs besides the pairs themselves:
/// token + NUL terminator + count + checksum
pub fn overhead(token_len: usize) -> usize {
    token_len + 1 + COUNT_SIZE + CHECKSUM_SIZE
}

/// Compare the expected token against the start of a record window.
///
/// Scoped to the whole window, with C `strncmp` semantics: bytes compare
/// until they differ (mismatch), both reach NUL (match), or the window runs
/// out (match). The window bound rather than the token length is deliberate
/// (see DESIGN.md, open questions); for any window longer than the token it
/// reduces to a prefix-plus-NUL check.
pub(crate) fn token_matches(expected: &[u8], window: &[u8]) -> bool {
    for (i, &stored) in window.iter().enumerate() {
        let wanted = expected.get(i).copied().unwrap_or(0);
        if wanted != stored {
            return false;
        }
        if wanted == 0 {
            return true;
        }
    }
    true
}

/// Reject tokens, keys, and values that embed the field terminator
pub(crate) fn ensure_no_nul(what: &str, bytes: &[u8]) -> crate::error::Result<()> {
    if bytes.contains(&0) {
        return Err(crate::error::ParamError::Format(format!(
            "{what} contains an embedded NUL byte"
        )));
    }
    Ok(())
}
