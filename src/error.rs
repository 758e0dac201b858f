//! Error types for paramvault
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ParamError
pub type Result<T> = std::result::Result<T, ParamError>;

/// Unified error type for paramvault operations
#[derive(Debug, Error)]
pub enum ParamError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Tokenizer Errors
    // -------------------------------------------------------------------------
    #[error("format error: {0}")]
    Format(String),

    #[error("colon before separator, comma expected")]
    MissingComma,

    #[error("comma before key/value delimiter, colon expected")]
    MissingColon,

    #[error("newline inside a quoted string")]
    UnterminatedQuote,

    #[error("escape interrupted by newline")]
    DanglingEscape,

    #[error("source ended before the input was complete")]
    Truncated,

    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("checksum mismatch: stored 0x{stored:02x}, computed 0x{computed:02x}")]
    ChecksumMismatch { stored: u8, computed: u8 },

    #[error("stored token does not match the expected token")]
    TokenMismatch,

    #[error("record needs {needed} bytes but capacity is {capacity}")]
    LengthExceeded { needed: usize, capacity: usize },

    // -------------------------------------------------------------------------
    // Sink Errors
    // -------------------------------------------------------------------------
    #[error("pair sink refused a pair: {0}")]
    AllocationFailure(String),

    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("device write failed: {0}")]
    DeviceWriteFailure(String),
}

impl ParamError {
    /// Whether this error means "no valid record here" rather than a fault.
    ///
    /// Soft errors are the expected outcome when reading a device that was
    /// never written, or was written under a different token; callers fall
    /// back to default values instead of escalating.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            ParamError::ChecksumMismatch { .. } | ParamError::TokenMismatch
        )
    }
}
