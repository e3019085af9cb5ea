use std::{collections::HashMap, num::NonZeroUsize, sync::Arc, time::Instant};

use log::info;
use parking_lot::{Mutex, MutexGuard};

use crate::{
    config::Config,
    error::Result,
    sql::{executor::ResultSet, plan::{planner::Planner, Command}, schema::Schema, types::Record},
    storage::{cache::RecordCache, engine::Storage, file::FileStorage},
};

/// The record engine: persisted schema and records plus the optional cache
///
/// Every operation re-reads persisted state, so nothing but the cache is
/// kept between calls. One lock per table serializes CRUD calls on that
/// table; a separate lock serializes schema changes.
pub struct Database<S: Storage> {
    storage: S,
    cache: Option<RecordCache>,
    schema_lock: Mutex<()>,
    table_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Database<FileStorage> {
    /// Opens file-backed storage as described by `config`
    pub fn open(config: &Config) -> Self {
        let db = Self::new(FileStorage::new(config));
        match config.cache_capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => db.with_cache(capacity),
            None => db,
        }
    }
}

impl<S: Storage> Database<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            cache: None,
            schema_lock: Mutex::new(()),
            table_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_cache(mut self, capacity: NonZeroUsize) -> Self {
        self.cache = Some(RecordCache::new(capacity));
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn cache(&self) -> Option<&RecordCache> {
        self.cache.as_ref()
    }

    pub fn load_schema(&self) -> Result<Schema> {
        self.storage.load_schema()
    }

    pub fn save_schema(&self, schema: &Schema) -> Result<()> {
        self.storage.save_schema(schema)
    }

    /// Loads a table's records, through the cache when one is configured
    ///
    /// Callers hold the table's lock, so a cache fill never races with the
    /// invalidation of a concurrent write.
    pub fn load_records(&self, table: &str) -> Result<Vec<Record>> {
        if let Some(records) = self.cache.as_ref().and_then(|c| c.get(table)) {
            return Ok(records);
        }
        let records = self.storage.load_records(table)?;
        if let Some(cache) = &self.cache {
            cache.put(table, records.clone());
        }
        Ok(records)
    }

    /// Replaces a table's records and drops its cache entry
    pub fn save_records(&self, table: &str, records: &[Record]) -> Result<()> {
        self.storage.save_records(table, records)?;
        self.invalidate(table);
        Ok(())
    }

    pub fn invalidate(&self, table: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(table);
        }
    }

    /// Exclusive lock on schema changes, held for one create or drop
    pub fn lock_schema(&self) -> MutexGuard<'_, ()> {
        self.schema_lock.lock()
    }

    /// Lock for one table; every CRUD call and `info` holds it while it runs
    pub fn table_lock(&self, table: &str) -> Arc<Mutex<()>> {
        self.table_locks
            .lock()
            .entry(table.to_string())
            .or_default()
            .clone()
    }

    pub fn session(&self) -> Session<'_, S> {
        Session { db: self, timing: false }
    }
}

/// Executes command lines against a database
pub struct Session<'a, S: Storage> {
    db: &'a Database<S>,
    timing: bool,
}

impl<'a, S: Storage + 'static> Session<'a, S> {
    /// Logs the duration of every executed command at info level
    pub fn with_timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }

    /// Parses and executes one command line
    pub fn execute(&mut self, line: &str) -> Result<ResultSet> {
        let command = Planner::new().build(line)?;
        self.execute_command(command)
    }

    pub fn execute_command(&mut self, command: Command) -> Result<ResultSet> {
        if !self.timing {
            return command.execute(self.db);
        }
        let name = command.name();
        let start = Instant::now();
        let result = command.execute(self.db);
        info!("{} completed in {:.3}s", name, start.elapsed().as_secs_f64());
        result
    }
}
