//! Parameter store
//!
//! The caller-owned context tying one record window to one device: a
//! `StorageDescriptor` for placement and token, the `Device` the bytes live
//! on, and optional defaults to fall back on when the device holds no valid
//! record. One store per record; overlapping windows are the caller's
//! responsibility to avoid.

use crate::descriptor::StorageDescriptor;
use crate::device::Device;
use crate::error::{ParamError, Result};
use crate::map::ParamMap;
use crate::record;

use super::wear;

/// Persistent parameter storage for one record window on one device
pub struct ParamStore<D: Device> {
    /// Placement and token of the record
    descriptor: StorageDescriptor,

    /// The device the record lives on (owned; recover with `into_device`)
    device: D,

    /// Fallback pairs returned by `load` when the device holds no valid
    /// record under this token
    defaults: Option<ParamMap>,

    /// Set by `begin` once the descriptor has been validated against the
    /// device; every operation requires it
    active: bool,
}

impl<D: Device> ParamStore<D> {
    /// Create a store; call `begin` before any other operation
    pub fn new(descriptor: StorageDescriptor, device: D) -> Self {
        Self {
            descriptor,
            device,
            defaults: None,
            active: false,
        }
    }

    /// Supply default pairs for `load` to fall back on
    pub fn with_defaults(mut self, defaults: ParamMap) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Validate the descriptor against the device and activate the store
    ///
    /// The window must be able to hold at least an empty record and must
    /// lie entirely inside the device.
    pub fn begin(&mut self) -> Result<()> {
        self.descriptor.validate()?;

        let end = self.descriptor.end_address().ok_or_else(|| {
            ParamError::DeviceUnavailable("record window overflows the address space".to_string())
        })?;
        if end > self.device.size() {
            return Err(ParamError::DeviceUnavailable(format!(
                "record window {}..{} beyond device size {}",
                self.descriptor.base_address,
                end,
                self.device.size()
            )));
        }

        self.active = true;
        tracing::debug!(
            token = %self.descriptor.token,
            base_address = self.descriptor.base_address,
            capacity = self.descriptor.capacity,
            "parameter store active"
        );
        Ok(())
    }

    /// Load the stored pairs, falling back to defaults on a soft miss
    ///
    /// `ChecksumMismatch` and `TokenMismatch` mean "no valid record here";
    /// with defaults supplied they yield a clone of the defaults, without
    /// they propagate. Hard errors always propagate.
    pub fn load(&mut self) -> Result<ParamMap> {
        self.ensure_active()?;

        let blob = wear::read_record(
            &mut self.device,
            self.descriptor.base_address,
            self.descriptor.capacity,
        )?;

        match record::decode(&blob, &self.descriptor.token) {
            Ok(pairs) => Ok(pairs.into_iter().collect()),
            Err(e) if e.is_soft() => match &self.defaults {
                Some(defaults) => {
                    tracing::warn!(error = %e, token = %self.descriptor.token, "no valid record, using defaults");
                    Ok(defaults.clone())
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    /// Encode and persist the map under this store's token
    ///
    /// Returns whether any device byte changed; saving an unchanged map
    /// costs no writes and no commit.
    pub fn save(&mut self, map: &ParamMap) -> Result<bool> {
        self.ensure_active()?;

        let blob = record::encode(
            &self.descriptor.token,
            map.pairs(),
            self.descriptor.capacity,
        )?;
        wear::write_record(&mut self.device, self.descriptor.base_address, &blob)
    }

    /// Zero the record window, invalidating any stored record
    ///
    /// A zeroed window fails the token check on the next load (empty-token
    /// stores excepted), so the record reads as absent.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_active()?;

        let zeros = vec![0u8; self.descriptor.capacity];
        wear::write_record(&mut self.device, self.descriptor.base_address, &zeros)?;
        Ok(())
    }

    /// Whether `begin` has succeeded
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The descriptor this store was built with
    pub fn descriptor(&self) -> &StorageDescriptor {
        &self.descriptor
    }

    /// Borrow the underlying device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutably borrow the underlying device
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consume the store and recover the device
    pub fn into_device(self) -> D {
        self.device
    }

    fn ensure_active(&self) -> Result<()> {
        if !self.active {
            return Err(ParamError::DeviceUnavailable(
                "store not started, call begin first".to_string(),
            ));
        }
        Ok(())
    }
}
