use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::{error::Result, sql::{schema::Schema, types::Record}, storage::engine::Storage};

/// In-memory storage, for tests and embedding
#[derive(Default)]
pub struct MemoryStorage {
    schema: Mutex<Schema>,
    tables: Mutex<HashMap<String, Vec<Record>>>,
    record_writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record document has ever been written for `table`
    pub fn has_records(&self, table: &str) -> bool {
        self.tables.lock().contains_key(table)
    }

    /// Number of record documents written so far, across all tables
    pub fn record_writes(&self) -> usize {
        self.record_writes.load(Ordering::SeqCst)
    }
}

impl Storage for MemoryStorage {
    fn load_schema(&self) -> Result<Schema> {
        Ok(self.schema.lock().clone())
    }

    fn save_schema(&self, schema: &Schema) -> Result<()> {
        *self.schema.lock() = schema.clone();
        Ok(())
    }

    fn load_records(&self, table: &str) -> Result<Vec<Record>> {
        Ok(self.tables.lock().get(table).cloned().unwrap_or_default())
    }

    fn save_records(&self, table: &str, records: &[Record]) -> Result<()> {
        self.tables.lock().insert(table.to_string(), records.to_vec());
        self.record_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
