//! Storage backend
//!
//! On wasm32 values go to `window.localStorage`. Native builds keep them in
//! a per-thread map so saves round-trip within a process (tests, the
//! headless binary) without touching the filesystem.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors raised while writing to storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage rejected write to `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::StorageError;

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    pub fn read(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    pub fn write(key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::StorageError;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn read(key: &str) -> Option<String> {
        STORE.with(|store| store.borrow().get(key).cloned())
    }

    pub fn write(key: &str, value: &str) -> Result<(), StorageError> {
        STORE.with(|store| {
            store
                .borrow_mut()
                .insert(key.to_string(), value.to_string())
        });
        Ok(())
    }

    #[cfg(test)]
    pub fn remove(key: &str) {
        STORE.with(|store| store.borrow_mut().remove(key));
    }
}

pub use backend::{read, write};

#[cfg(all(test, not(target_arch = "wasm32")))]
use backend::remove;

/// Load a JSON value, falling back to `T::default()`
pub fn load_json<T: DeserializeOwned + Default>(key: &str) -> T {
    let Some(json) = read(key) else {
        log::info!("No saved `{key}`, using defaults");
        return T::default();
    };

    match serde_json::from_str(&json) {
        Ok(value) => {
            log::info!("Loaded `{key}`");
            value
        }
        Err(e) => {
            log::warn!("Discarding corrupt `{key}`: {e}");
            T::default()
        }
    }
}

/// Save a value as JSON
pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    write(key, &json)?;
    log::debug!("Saved `{key}`");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Blob {
        n: u32,
    }

    #[test]
    fn test_missing_key_uses_default() {
        assert_eq!(load_json::<Blob>("storage_test_missing"), Blob::default());
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_save_then_load() {
        save_json("storage_test_blob", &Blob { n: 7 }).unwrap();
        assert_eq!(load_json::<Blob>("storage_test_blob"), Blob { n: 7 });
        remove("storage_test_blob");
        assert_eq!(read("storage_test_blob"), None);
    }

    #[test]
    fn test_corrupt_value_uses_default() {
        write("storage_test_corrupt", "{not json").unwrap();
        assert_eq!(load_json::<Blob>("storage_test_corrupt"), Blob::default());
    }
}
