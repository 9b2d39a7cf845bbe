//! eframe's persistent storage as the session's key/value store.

use warden_business::{KeyValueStore, KeyValueStoreMut};

/// Read-only view, available while the app is being created.
pub struct StorageRef<'a>(pub &'a dyn eframe::Storage);

impl KeyValueStore for StorageRef<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_string(key)
    }
}

/// Writable view handed to `eframe::App::save`.
pub struct StorageMut<'a>(pub &'a mut dyn eframe::Storage);

impl KeyValueStore for StorageMut<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_string(key)
    }
}

impl KeyValueStoreMut for StorageMut<'_> {
    fn set(&mut self, key: &str, value: String) {
        self.0.set_string(key, value);
    }
}
