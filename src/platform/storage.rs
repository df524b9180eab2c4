//! Concrete key-value backends

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use crate::persistence::{KeyValueStore, StorageError};

    /// All keys in one JSON object on disk. Writes go to a temp file that is
    /// renamed over the original.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
            match fs::read_to_string(&self.path) {
                Ok(text) => Ok(serde_json::from_str(&text)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            // A corrupt file is replaced rather than blocking every future save
            let mut entries = self.read_all().unwrap_or_else(|e| {
                log::warn!("Discarding unreadable store {}: {e}", self.path.display());
                BTreeMap::new()
            });
            entries.insert(key.to_string(), value.to_string());

            if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

}

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::persistence::{KeyValueStore, StorageError};

    /// Browser `localStorage`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .ok_or_else(|| StorageError::Unavailable("no window".into()))?
                .local_storage()
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
                .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
        }
    }

    impl KeyValueStore for LocalStorageStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Self::storage()?
                .get_item(key)
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Rejected(format!("{e:?}")))
        }
    }
}
