use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::{Coord, RankedHospital};

/// Cache key for the ~111 m grid cell containing `at`. Nearby lookups land in
/// the same cell and share one entry.
pub fn cell_key(at: Coord) -> String {
    format!(
        "hospitals_{}_{}",
        (at.lat * 1000.0).round() as i64,
        (at.lon * 1000.0).round() as i64
    )
}

/// Storage seam for the hospital cache. `set` failures are reported but are
/// never fatal to a lookup.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

/// Ranked-list cache on top of a [`KeyValueStore`]. Entries are overwritten
/// on each successful lookup for their cell and never expire.
pub struct HospitalCache {
    store: Box<dyn KeyValueStore>,
}

impl HospitalCache {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self { store: Box::new(store) }
    }

    pub fn get(&self, key: &str) -> Option<Vec<RankedHospital>> {
        let raw = self.store.get(key)?;

        match serde_json::from_str(&raw) {
            Ok(hospitals) => Some(hospitals),
            Err(e) => {
                log::warn!("discarding unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    pub fn put(&self, key: &str, hospitals: &[RankedHospital]) -> anyhow::Result<()> {
        self.store.set(key, serde_json::to_string(hospitals)?)
    }
}
