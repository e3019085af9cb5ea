//! Record cache - LRU of whole tables, keyed by table name
//!
//! Owned by the record store. The engine invalidates a table's entry right
//! after it writes that table, so a hit always equals what storage holds.

use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;
use parking_lot::Mutex;

use crate::sql::types::Record;

pub struct RecordCache {
    cache: Mutex<LruCache<String, Vec<Record>>>,
}

impl RecordCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, table: &str) -> Option<Vec<Record>> {
        let hit = self.cache.lock().get(table).cloned();
        if hit.is_some() {
            debug!("record cache hit for {}", table);
        }
        hit
    }

    pub fn put(&self, table: &str, records: Vec<Record>) {
        self.cache.lock().put(table.to_string(), records);
    }

    pub fn invalidate(&self, table: &str) {
        if self.cache.lock().pop(table).is_some() {
            debug!("record cache invalidated for {}", table);
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
