//! Storage descriptor
//!
//! Where one record lives and under which token. Supplied by the caller,
//! carried by the `ParamStore` context; there is no ambient global
//! configuration. Multiple records on one device use non-overlapping
//! windows, one descriptor each.

use crate::error::{ParamError, Result};
use crate::record;

/// Placement and identity of one record on a device
#[derive(Debug, Clone)]
pub struct StorageDescriptor {
    /// First byte of the record window on the device
    pub base_address: usize,

    /// Size of the record window; exceeding it is always an encode-time
    /// failure, never a runtime overwrite
    pub capacity: usize,

    /// Schema label written as the record prefix
    pub token: String,
}

impl StorageDescriptor {
    /// Create a descriptor
    pub fn new(base_address: usize, capacity: usize, token: impl Into<String>) -> Self {
        Self {
            base_address,
            capacity,
            token: token.into(),
        }
    }

    /// Create a new descriptor builder
    pub fn builder() -> StorageDescriptorBuilder {
        StorageDescriptorBuilder::default()
    }

    /// Smallest capacity that can hold any record under this token:
    /// token + NUL + count + checksum, zero pairs
    pub fn min_capacity(&self) -> usize {
        record::overhead(self.token.len())
    }

    /// Check the capacity invariant
    ///
    /// A window below `min_capacity` can never hold a record; every save
    /// would fail, so the descriptor itself is rejected up front.
    pub fn validate(&self) -> Result<()> {
        let needed = self.min_capacity();
        if self.capacity < needed {
            return Err(ParamError::LengthExceeded {
                needed,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// First byte past the record window
    pub fn end_address(&self) -> Option<usize> {
        self.base_address.checked_add(self.capacity)
    }
}

/// Builder for StorageDescriptor
#[derive(Debug, Default)]
pub struct StorageDescriptorBuilder {
    base_address: usize,
    capacity: usize,
    token: String,
}

impl StorageDescriptorBuilder {
    /// Set the first byte of the record window
    pub fn base_address(mut self, address: usize) -> Self {
        self.base_address = address;
        self
    }

    /// Set the record window size
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the schema token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn build(self) -> StorageDescriptor {
        StorageDescriptor {
            base_address: self.base_address,
            capacity: self.capacity,
            token: self.token,
        }
    }
}
