//! # paramvault
//!
//! Durable key/value parameter storage for byte-addressable devices with:
//! - CRC-8 integrity and schema-token guards on every record
//! - Wear-aware writes (read-compare-write, commit only on change)
//! - Byte-at-a-time streaming import of a restricted flat text format
//! - Caller-owned contexts: no global state, no background threads
//!
//! ## Architecture Overview
//!
//! ```text
//!        text bytes                        device bytes
//!   (file / network body)              (EEPROM-like media)
//!            │                                 ▲ │
//!            ▼                                 │ ▼
//!   ┌─────────────────┐                ┌───────────────────┐
//!   │ StreamTokenizer │                │  WearAwareStore   │
//!   │  (byte-at-a-    │                │ (read-compare-    │
//!   │   time, no      │                │  write, commit    │
//!   │   lookahead)    │                │  on change only)  │
//!   └────────┬────────┘                └───────▲─┬─────────┘
//!            │ ordered pairs              blob │ │ blob
//!            ▼                                 │ ▼
//!   ┌─────────────────┐   encode      ┌───────────────────┐
//!   │    ParamMap     │──────────────▶│    RecordCodec    │
//!   │ (caller-owned,  │◀──────────────│ (token|count|     │
//!   │  ordered)       │    decode     │  pairs|crc)       │
//!   └─────────────────┘               └─────────┬─────────┘
//!                                               │
//!                                               ▼
//!                                     ┌───────────────────┐
//!                                     │  ChecksumEngine   │
//!                                     │    (CRC-8/0x1D)   │
//!                                     └───────────────────┘
//! ```
//!
//! A record whose checksum or token does not verify reads as absent: the
//! store falls back to caller-supplied defaults rather than trusting it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;

pub mod checksum;
pub mod descriptor;
pub mod device;
pub mod map;
pub mod record;
pub mod store;
pub mod tokenizer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ParamError, Result};

pub use checksum::{crc8, Crc8Hasher};
pub use descriptor::StorageDescriptor;
pub use device::{Device, FileDevice, MemoryDevice};
pub use map::{Pair, ParamMap};
pub use store::ParamStore;
pub use tokenizer::{parse, parse_into, ByteSource, PairSink};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of paramvault
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
