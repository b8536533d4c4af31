use std::path::PathBuf;

use dinetime_booking_rust::storage::LocalStorage;
use dinetime_booking_rust::utils::get_epoch_ms;

/// Storage backed by a fresh temp file, so tests never share state
pub fn temp_storage(tag: &str) -> LocalStorage {
    let path = temp_storage_path(tag);
    LocalStorage::with_path(path)
}

pub fn temp_storage_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "dinetime-test-{}-{}-{}.json",
        tag,
        std::process::id(),
        get_epoch_ms()
    ))
}
