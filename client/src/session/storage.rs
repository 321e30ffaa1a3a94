//! Key-value storage seam over the browser's Web Storage areas.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every session component reads and writes through `KeyValueStore` instead of
//! touching `window.sessionStorage` directly. The browser build plugs in
//! `BrowserStorage`; tests and SSR use `MemoryStore`.
//!
//! ERROR HANDLING
//! ==============
//! Web Storage calls can throw (quota, privacy mode, sandboxed iframes). Those
//! surface as `StorageError` so callers decide whether a failure is fatal.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Error raised by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage area unavailable: {0}")]
    Unavailable(String),
    #[error("storage {op} failed for '{key}': {message}")]
    Operation { op: &'static str, key: String, message: String },
}

impl StorageError {
    #[cfg(any(test, feature = "hydrate"))]
    pub(crate) fn op(op: &'static str, key: &str, message: impl Into<String>) -> Self {
        Self::Operation { op, key: key.to_owned(), message: message.into() }
    }
}

/// Synchronous string key-value store with Web Storage semantics.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Snapshot of all key names currently stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot enumerate keys.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the clear.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Which Web Storage area a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageArea {
    Session,
    Local,
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => f.write_str("sessionStorage"),
            Self::Local => f.write_str("localStorage"),
        }
    }
}

/// The two storage areas a page can reach.
#[derive(Debug, Clone, Default)]
pub struct StorageAreas<S> {
    pub session: S,
    pub local: S,
}

impl<S: KeyValueStore> StorageAreas<S> {
    #[must_use]
    pub fn new(session: S, local: S) -> Self {
        Self { session, local }
    }

    /// Open both areas with `open`. If either refuses, the failure is
    /// logged and whatever did open is handed back so it can still be wiped.
    ///
    /// # Errors
    ///
    /// Returns the areas that opened when at least one did not.
    pub fn open_with(
        open: impl Fn(StorageArea) -> Result<S, StorageError>,
    ) -> Result<Self, Vec<(StorageArea, S)>> {
        match (open(StorageArea::Session), open(StorageArea::Local)) {
            (Ok(session), Ok(local)) => Ok(Self::new(session, local)),
            (session, local) => {
                let mut opened = Vec::new();
                for (area, result) in [(StorageArea::Session, session), (StorageArea::Local, local)] {
                    match result {
                        Ok(store) => opened.push((area, store)),
                        Err(e) => log::error!("{area} unavailable: {e}"),
                    }
                }
                Err(opened)
            }
        }
    }

    /// Both areas, session first.
    pub fn iter(&self) -> impl Iterator<Item = (StorageArea, &S)> {
        [(StorageArea::Session, &self.session), (StorageArea::Local, &self.local)].into_iter()
    }

    #[must_use]
    pub fn area(&self, area: StorageArea) -> &S {
        match area {
            StorageArea::Session => &self.session,
            StorageArea::Local => &self.local,
        }
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory store. Clones share the same entries, like two handles on one
/// browser storage area.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `pairs`.
    #[must_use]
    pub fn with_entries<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(pairs.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())));
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

impl StorageAreas<MemoryStore> {
    /// Two fresh, empty in-memory areas.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }
}

// =============================================================================
// BROWSER STORE
// =============================================================================

/// `web_sys::Storage` handle for one Web Storage area.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

#[cfg(feature = "hydrate")]
fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    /// Open `area` on the current window.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when there is no window or the
    /// browser refuses access to the area.
    pub fn open(area: StorageArea) -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        let storage = match area {
            StorageArea::Session => window.session_storage(),
            StorageArea::Local => window.local_storage(),
        };
        match storage {
            Ok(Some(inner)) => Ok(Self { inner }),
            Ok(None) => Err(StorageError::Unavailable(format!("{area} missing"))),
            Err(e) => Err(StorageError::Unavailable(format!("{area}: {}", js_message(&e)))),
        }
    }
}

#[cfg(feature = "hydrate")]
impl StorageAreas<BrowserStorage> {
    /// Open both areas of the current window.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if either area cannot be opened.
    pub fn browser() -> Result<Self, StorageError> {
        Ok(Self::new(BrowserStorage::open(StorageArea::Session)?, BrowserStorage::open(StorageArea::Local)?))
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|e| StorageError::op("get", key, js_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| StorageError::op("set", key, js_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(|e| StorageError::op("remove", key, js_message(&e)))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let len = self.inner.length().map_err(|e| StorageError::op("keys", "*", js_message(&e)))?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.inner.key(index).map_err(|e| StorageError::op("keys", "*", js_message(&e)))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear().map_err(|e| StorageError::op("clear", "*", js_message(&e)))
    }
}
