//! Store Module
//!
//! Moves record blobs between memory and a device.
//!
//! ## Responsibilities
//! - Read a record window off a device without interpretation
//! - Write a blob with read-compare-write, sparing unchanged cells
//! - Commit only when at least one byte actually changed
//! - Coordinate descriptor, codec, and device behind `ParamStore`

mod params;
mod wear;

pub use params::ParamStore;
pub use wear::{read_record, write_record};
