use crate::{error::Result, sql::{schema::Schema, types::Record}};

/// Persistence backend for the schema document and per-table record documents
///
/// Reads of a document that was never written return an empty value. Writes
/// replace the whole document. The schema and a table's records are separate
/// documents and are never written together.
pub trait Storage {
    fn load_schema(&self) -> Result<Schema>;
    fn save_schema(&self, schema: &Schema) -> Result<()>;

    fn load_records(&self, table: &str) -> Result<Vec<Record>>;
    fn save_records(&self, table: &str, records: &[Record]) -> Result<()>;
}
