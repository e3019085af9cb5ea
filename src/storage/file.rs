use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::Config,
    error::{Error, Result},
    sql::{
        schema::{validate_table_name, Schema},
        types::Record,
    },
    storage::engine::Storage,
};

/// JSON document storage: one schema file, one `<table>.json` per table
pub struct FileStorage {
    schema_file: PathBuf,
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            schema_file: config.schema_file.clone(),
            data_dir: config.data_dir.clone(),
        }
    }

    /// Path of the record document for `table`, always directly under the data directory
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        validate_table_name(table)?;
        Ok(self.data_dir.join(format!("{}.json", table)))
    }
}

impl Storage for FileStorage {
    fn load_schema(&self) -> Result<Schema> {
        Ok(read_document(&self.schema_file)?.unwrap_or_default())
    }

    fn save_schema(&self, schema: &Schema) -> Result<()> {
        write_document(&self.schema_file, schema)
    }

    fn load_records(&self, table: &str) -> Result<Vec<Record>> {
        Ok(read_document(&self.table_path(table)?)?.unwrap_or_default())
    }

    fn save_records(&self, table: &str, records: &[Record]) -> Result<()> {
        write_document(&self.table_path(table)?, records)
    }
}

/// Reads a JSON document; None when the file does not exist
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} not found, reading as empty", path.display());
            return Ok(None);
        }
        Err(err) => {
            return Err(Error::StorageUnavailable(format!("{}: {}", path.display(), err)));
        }
    };
    let document = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| Error::StorageUnavailable(format!("{}: {}", path.display(), err)))?;
    debug!("loaded {}", path.display());
    Ok(Some(document))
}

/// Replaces a JSON document, creating parent directories as needed
fn write_document<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.flush()?;
    debug!("saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::FileStorage;
    use crate::{
        config::Config,
        error::{Error, Result},
        storage::engine::{tests::{test_records_roundtrip, test_schema_roundtrip}, Storage},
    };

    #[test]
    fn test_file() -> Result<()> {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(&Config::rooted_at(dir.path()));
        test_schema_roundtrip(&storage)?;
        test_records_roundtrip(&storage)?;
        assert!(dir.path().join("data").join("users.json").exists());
        Ok(())
    }

    #[test]
    fn test_file_document_format() -> Result<()> {
        let dir = TempDir::new()?;
        let config = Config::rooted_at(dir.path());
        fs::write(&config.schema_file, r#"{"users": ["ID:int", "name:str", "age:int"]}"#)?;
        fs::create_dir_all(&config.data_dir)?;
        fs::write(
            config.data_dir.join("users.json"),
            r#"[{"ID": 1, "name": "Ann", "age": 30}, {"ID": 2, "name": "Bo", "age": 4}]"#,
        )?;

        let storage = FileStorage::new(&config);
        let schema = storage.load_schema()?;
        assert_eq!(schema.must_get("users")?.column_specs(), vec!["ID:int", "name:str", "age:int"]);
        let records = storage.load_records("users")?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"].to_string(), "Bo");
        Ok(())
    }

    #[test]
    fn test_file_table_names_stay_in_data_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let config = Config::rooted_at(dir.path());
        let storage = FileStorage::new(&config);

        assert_eq!(storage.table_path("users")?, config.data_dir.join("users.json"));

        let outside = dir.path().join("escaped").to_string_lossy().into_owned();
        for name in ["../up", outside.as_str(), ".."] {
            assert!(matches!(
                storage.save_records(name, &[]),
                Err(Error::InvalidTableName(_))
            ));
            assert!(matches!(storage.load_records(name), Err(Error::InvalidTableName(_))));
        }
        assert!(!dir.path().join("up.json").exists());
        assert!(!dir.path().join("escaped.json").exists());
        Ok(())
    }

    #[test]
    fn test_file_corrupt_document() -> Result<()> {
        let dir = TempDir::new()?;
        let config = Config::rooted_at(dir.path());
        fs::write(&config.schema_file, "{ not json")?;

        let storage = FileStorage::new(&config);
        assert!(matches!(storage.load_schema(), Err(Error::StorageUnavailable(_))));
        Ok(())
    }
}
