//! Store Tests
//!
//! Tests for wear-aware record I/O, the devices, and ParamStore.

use paramvault::record::encode;
use paramvault::store::{read_record, write_record};
use paramvault::{
    Device, FileDevice, MemoryDevice, Pair, ParamError, ParamMap, ParamStore, StorageDescriptor,
};

fn sample_map() -> ParamMap {
    let mut map = ParamMap::new();
    map.set("ssid", "backyard");
    map.set("pass", "hunter2");
    map
}

// =============================================================================
// Wear-Aware Write Tests
// =============================================================================

#[test]
fn test_write_then_read_back() {
    let mut device = MemoryDevice::new(256);
    let blob = encode("CFG1", sample_map().pairs(), 128).unwrap();

    let changed = write_record(&mut device, 16, &blob).unwrap();
    assert!(changed);

    let read_back = read_record(&mut device, 16, 128).unwrap();
    assert_eq!(read_back, blob.to_vec());
}

#[test]
fn test_identical_rewrite_costs_nothing() {
    let mut device = MemoryDevice::new(256);
    let blob = encode("CFG1", sample_map().pairs(), 128).unwrap();

    write_record(&mut device, 0, &blob).unwrap();
    let writes_after_first = device.byte_writes();
    let commits_after_first = device.commits();

    let changed = write_record(&mut device, 0, &blob).unwrap();

    assert!(!changed);
    assert_eq!(device.byte_writes(), writes_after_first);
    assert_eq!(device.commits(), commits_after_first);
}

#[test]
fn test_first_write_touches_only_nonzero_cells() {
    // The device starts zeroed and the blob's padding is zeros, so only
    // the used, nonzero bytes cost a write.
    let mut device = MemoryDevice::new(64);
    let blob = encode("CFG", &[Pair::new("a", "1")], 32).unwrap();
    let nonzero = blob.iter().filter(|&&b| b != 0).count() as u64;

    write_record(&mut device, 0, &blob).unwrap();

    assert_eq!(device.byte_writes(), nonzero);
    assert_eq!(device.commits(), 1);
}

#[test]
fn test_partial_change_rewrites_only_difference() {
    let mut device = MemoryDevice::new(256);

    let mut map = sample_map();
    let blob = encode("CFG1", map.pairs(), 128).unwrap();
    write_record(&mut device, 0, &blob).unwrap();
    let writes_before = device.byte_writes();

    // Same shape, one value byte different (plus the checksum).
    map.set("pass", "hunter3");
    let blob2 = encode("CFG1", map.pairs(), 128).unwrap();
    let changed = write_record(&mut device, 0, &blob2).unwrap();

    assert!(changed);
    assert_eq!(device.commits(), 2);
    let delta = device.byte_writes() - writes_before;
    assert!(delta <= 2, "expected at most 2 byte writes, got {}", delta);
}

#[test]
fn test_write_beyond_device_fails() {
    let mut device = MemoryDevice::new(32);
    let blob = encode("CFG1", &[], 64).unwrap();

    let result = write_record(&mut device, 0, &blob);
    assert!(result.is_err());
}

#[test]
fn test_read_beyond_device_fails() {
    let mut device = MemoryDevice::new(32);
    let result = read_record(&mut device, 16, 32);
    assert!(matches!(result, Err(ParamError::DeviceUnavailable(_))));
}

// =============================================================================
// ParamStore Lifecycle Tests
// =============================================================================

#[test]
fn test_operations_require_begin() {
    let descriptor = StorageDescriptor::new(0, 64, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));

    assert!(!store.is_active());
    assert!(matches!(
        store.load(),
        Err(ParamError::DeviceUnavailable(_))
    ));
    assert!(matches!(
        store.save(&sample_map()),
        Err(ParamError::DeviceUnavailable(_))
    ));
}

#[test]
fn test_begin_rejects_undersized_capacity() {
    // "CFG1" needs 4 + 1 + 2 + 1 = 8 bytes minimum.
    let descriptor = StorageDescriptor::new(0, 7, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));

    assert!(matches!(
        store.begin(),
        Err(ParamError::LengthExceeded { needed: 8, capacity: 7 })
    ));
}

#[test]
fn test_begin_rejects_window_beyond_device() {
    let descriptor = StorageDescriptor::new(200, 64, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));

    assert!(matches!(
        store.begin(),
        Err(ParamError::DeviceUnavailable(_))
    ));
}

// =============================================================================
// ParamStore Save/Load Tests
// =============================================================================

#[test]
fn test_save_and_load() {
    let descriptor = StorageDescriptor::new(16, 128, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));
    store.begin().unwrap();

    let map = sample_map();
    assert!(store.save(&map).unwrap());

    let loaded = store.load().unwrap();
    assert_eq!(loaded, map);
}

#[test]
fn test_save_unchanged_map_is_free() {
    let descriptor = StorageDescriptor::new(0, 128, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));
    store.begin().unwrap();

    let map = sample_map();
    assert!(store.save(&map).unwrap());
    assert!(!store.save(&map).unwrap());
    assert_eq!(store.device().commits(), 1);
}

#[test]
fn test_load_from_blank_device_without_defaults() {
    let descriptor = StorageDescriptor::new(0, 64, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));
    store.begin().unwrap();

    let err = store.load().unwrap_err();
    assert!(err.is_soft());
    assert!(matches!(err, ParamError::TokenMismatch));
}

#[test]
fn test_load_from_blank_device_with_defaults() {
    let descriptor = StorageDescriptor::new(0, 64, "CFG1");
    let store = ParamStore::new(descriptor, MemoryDevice::new(256));
    let mut store = store.with_defaults(sample_map());
    store.begin().unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, sample_map());
}

#[test]
fn test_corruption_falls_back_to_defaults() {
    let descriptor = StorageDescriptor::new(0, 128, "CFG1");
    let mut store =
        ParamStore::new(descriptor, MemoryDevice::new(256)).with_defaults(sample_map());
    store.begin().unwrap();

    let mut stored = sample_map();
    stored.set("ssid", "garage");
    store.save(&stored).unwrap();

    // Single flipped bit inside the record window.
    let current = store.device_mut().read_byte(10).unwrap();
    store.device_mut().write_byte(10, current ^ 0x04).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, sample_map());
}

#[test]
fn test_wrong_token_reads_as_absent() {
    let device = {
        let descriptor = StorageDescriptor::new(0, 128, "cfgA");
        let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));
        store.begin().unwrap();
        store.save(&sample_map()).unwrap();
        store.into_device()
    };

    let descriptor = StorageDescriptor::new(0, 128, "cfgB");
    let mut store = ParamStore::new(descriptor, device);
    store.begin().unwrap();

    assert!(matches!(store.load(), Err(ParamError::TokenMismatch)));
}

#[test]
fn test_save_over_capacity() {
    let descriptor = StorageDescriptor::new(0, 16, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));
    store.begin().unwrap();

    let result = store.save(&sample_map());
    assert!(matches!(result, Err(ParamError::LengthExceeded { .. })));

    // The failed save must not have touched the device.
    assert_eq!(store.device().byte_writes(), 0);
    assert_eq!(store.device().commits(), 0);
}

#[test]
fn test_clear_invalidates_record() {
    let descriptor = StorageDescriptor::new(0, 128, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));
    store.begin().unwrap();

    store.save(&sample_map()).unwrap();
    store.clear().unwrap();

    assert!(matches!(store.load(), Err(ParamError::TokenMismatch)));
}

#[test]
fn test_clear_blank_window_skips_commit() {
    let descriptor = StorageDescriptor::new(0, 64, "CFG1");
    let mut store = ParamStore::new(descriptor, MemoryDevice::new(256));
    store.begin().unwrap();

    store.clear().unwrap();
    assert_eq!(store.device().commits(), 0);
}

// =============================================================================
// File Device Tests
// =============================================================================

#[test]
fn test_file_device_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.bin");

    {
        let descriptor = StorageDescriptor::new(32, 128, "CFG1");
        let device = FileDevice::open(&path, 512).unwrap();
        let mut store = ParamStore::new(descriptor, device);
        store.begin().unwrap();
        store.save(&sample_map()).unwrap();
    }

    // Reopen: the committed record survives the power cycle.
    let descriptor = StorageDescriptor::new(32, 128, "CFG1");
    let device = FileDevice::open(&path, 512).unwrap();
    let mut store = ParamStore::new(descriptor, device);
    store.begin().unwrap();

    assert_eq!(store.load().unwrap(), sample_map());
}

#[test]
fn test_file_device_uncommitted_writes_stay_in_shadow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shadow.bin");

    {
        let mut device = FileDevice::open(&path, 64).unwrap();
        device.write_byte(0, 0xaa).unwrap();
        assert!(device.is_dirty());
        // Dropped without commit.
    }

    let mut device = FileDevice::open(&path, 64).unwrap();
    assert_eq!(device.read_byte(0).unwrap(), 0x00);
}

#[test]
fn test_file_device_commit_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("commit.bin");

    {
        let mut device = FileDevice::open(&path, 64).unwrap();
        device.write_byte(5, 0x5a).unwrap();
        device.commit().unwrap();
        assert!(!device.is_dirty());
    }

    let mut device = FileDevice::open(&path, 64).unwrap();
    assert_eq!(device.read_byte(5).unwrap(), 0x5a);
}
