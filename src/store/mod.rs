//! Process-wide key/value store reached through a lazily-built singleton.

mod notifier;

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, trace};

pub use notifier::{Notifier, StdoutNotifier};

#[cfg(test)]
pub(crate) use notifier::testing;

pub type Key = i64;

pub const CREATION_NOTICE: &str = "Database Connection Created.";

static SHARED_STORE: Lazy<SharedStore> = Lazy::new(|| {
    debug!("constructing shared store");
    SharedStore::with_notifier(Arc::new(StdoutNotifier))
});

/// Returns the process-wide store, building it on first use.
///
/// Concurrent first callers block until the single construction finishes,
/// so the creation notice is printed exactly once and every caller sees
/// the same instance.
pub fn get_instance() -> &'static SharedStore {
    &SHARED_STORE
}

pub struct SharedStore {
    entries: Mutex<HashMap<Key, String>>,
    notifier: Arc<dyn Notifier>,
}

impl SharedStore {
    pub(crate) fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        notifier.notify(CREATION_NOTICE);

        Self {
            entries: Mutex::new(HashMap::new()),
            notifier,
        }
    }

    /// Inserts or overwrites the value stored under `key`.
    pub fn save(&self, key: Key, value: impl Into<String>) {
        let value = value.into();
        let line = format!("Data Saved: Key = {}, Value = {}", key, value);

        let mut entries = self.entries.lock();
        entries.insert(key, value);
        self.notifier.notify(&line);
        trace!("entries after save: {}", entries.len());
    }

    /// Describes the entry for `key`, or its absence.
    pub fn get(&self, key: Key) -> String {
        match self.lookup(key) {
            Some(value) => format!("Data for Key {}: {}", key, value),
            None => format!("No Data found for Key {}", key),
        }
    }

    pub fn lookup(&self, key: Key) -> Option<String> {
        self.entries.lock().get(&key).cloned()
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.entries.lock().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
