//! Database configuration
//!
//! Where the schema document and per-table record documents live, and which
//! optional layers (record cache, operation timing) are switched on.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default directory holding one `<table>.json` record document per table
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default schema document path
pub const DEFAULT_SCHEMA_FILE: &str = "db_meta.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub schema_file: PathBuf,
    /// Number of tables whose records are kept in the LRU cache; `None` disables it
    pub cache_capacity: Option<usize>,
    /// Log the wall-clock duration of every executed command
    pub timing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            schema_file: PathBuf::from(DEFAULT_SCHEMA_FILE),
            cache_capacity: None,
            timing: false,
        }
    }
}

impl Config {
    /// Config rooted at `dir`: records under `dir/data`, schema at `dir/db_meta.json`
    pub fn rooted_at(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_dir: dir.join(DEFAULT_DATA_DIR),
            schema_file: dir.join(DEFAULT_SCHEMA_FILE),
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_file = path.into();
        self
    }

    /// A capacity of zero disables the cache
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity).filter(|c| *c > 0);
        self
    }

    pub fn with_timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }
}
