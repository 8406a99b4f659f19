//! Record persistence
//!
//! The session treats storage as a synchronous key-value map: a `set` must
//! land in the backing medium before it returns. Backends:
//! - `MemoryStore`: volatile, for tests and hosts without storage
//! - `FileStore` (native): one JSON file, rewritten in full on every write
//! - `LocalStore` (wasm32): browser LocalStorage

use std::collections::HashMap;

/// A persisted key-value mapping.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Writes are synchronous on update; when this returns, the value is in
    /// the backing medium.
    fn set(&mut self, key: &str, value: &str);
}

/// Volatile store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::KvStore;

    /// A JSON object file on disk.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        entries: HashMap<String, String>,
    }

    impl FileStore {
        /// Open a store, reading whatever is already there. A missing file
        /// is an empty store; a corrupt one is logged and treated as empty.
        pub fn open(path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            let entries = match std::fs::read_to_string(&path) {
                Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                    log::warn!("corrupt store at {}: {err}", path.display());
                    HashMap::new()
                }),
                Err(_) => HashMap::new(),
            };
            Self { path, entries }
        }
    }

    impl KvStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.entries.insert(key.to_owned(), value.to_owned());
            match serde_json::to_string_pretty(&self.entries) {
                Ok(json) => {
                    if let Err(err) = std::fs::write(&self.path, json) {
                        log::warn!("failed to write {}: {err}", self.path.display());
                    }
                }
                Err(err) => log::warn!("failed to encode store: {err}"),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::KvStore;

    /// Browser LocalStorage.
    #[derive(Debug, Default)]
    pub struct LocalStore;

    impl LocalStore {
        pub fn new() -> Self {
            Self
        }

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
        }
    }

    impl KvStore for LocalStore {
        fn get(&self, key: &str) -> Option<String> {
            Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
        }

        fn set(&mut self, key: &str, value: &str) {
            if let Some(storage) = Self::storage() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("LocalStorage write failed for {key}");
                }
            }
        }
    }
}
