use std::{
    fmt::{self, Display},
    path::{Component, Path},
};

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{error::{Error, Result}, sql::types::DataType};

/// Name of the synthetic identifier column every table starts with
pub const ID_COLUMN: &str = "ID";

/// Checks that a table name can double as a file name inside the data directory
///
/// The name must be a single normal path component: not empty, no `/` or `\`,
/// not `.` or `..`, not absolute.
pub fn validate_table_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidTableName(name.to_string()));
    }
    Ok(())
}

/// Column schema definition
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self { name: name.into(), datatype }
    }

    /// The identifier column injected at position 0
    pub fn id() -> Self {
        Self::new(ID_COLUMN, DataType::Integer)
    }

    /// Parses a `name:type` column spec
    pub fn parse(spec: &str) -> Result<Column> {
        let parts = spec.split(':').collect::<Vec<_>>();
        let [name, tag] = parts.as_slice() else {
            return Err(Error::MalformedColumnSpec(spec.to_string()));
        };
        if name.is_empty() {
            return Err(Error::MalformedColumnSpec(spec.to_string()));
        }
        let datatype = DataType::from_tag(tag).ok_or_else(|| Error::UnsupportedColumnType {
            column: name.to_string(),
            data_type: tag.to_string(),
        })?;
        Ok(Column::new(*name, datatype))
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.datatype)
    }
}

/// Table schema definition
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Ordered columns, `ID` first
    pub columns: Vec<Column>,
}

impl Table {
    /// Builds a table from caller column specs, prepending the `ID` column
    pub fn from_specs<S: AsRef<str>>(name: &str, specs: &[S]) -> Result<Table> {
        validate_table_name(name)?;
        let mut columns = vec![Column::id()];
        for spec in specs {
            let column = Column::parse(spec.as_ref())?;
            // Names are unique within a table, ID included
            if columns.iter().any(|c| c.name == column.name) {
                return Err(Error::MalformedColumnSpec(format!(
                    "{} (duplicate column name)",
                    spec.as_ref()
                )));
            }
            columns.push(column);
        }
        Ok(Table { name: name.to_string(), columns })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Columns bound positionally by INSERT (everything but `ID`)
    pub fn value_columns(&self) -> &[Column] {
        &self.columns[1..]
    }

    /// Column specs as persisted, e.g. `["ID:int", "name:str"]`
    pub fn column_specs(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.to_string()).collect()
    }
}

/// All table definitions, kept in creation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns the table, or `TableNotFound`
    pub fn must_get(&self, name: &str) -> Result<&Table> {
        self.get(name).ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn insert(&mut self, table: Table) -> Result<()> {
        if self.contains(&table.name) {
            return Err(Error::TableAlreadyExists(table.name));
        }
        self.tables.push(table);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Table> {
        let pos = self
            .tables
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        Ok(self.tables.remove(pos))
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Persisted as `{"table": ["ID:int", "name:str"], ...}` in creation order
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for table in &self.tables {
            map.serialize_entry(&table.name, &table.column_specs())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of table name to column specs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Schema, A::Error> {
        let mut schema = Schema::new();
        while let Some((name, specs)) = access.next_entry::<String, Vec<String>>()? {
            let columns = specs
                .iter()
                .map(|s| Column::parse(s))
                .collect::<Result<Vec<_>>>()
                .map_err(de::Error::custom)?;
            schema
                .insert(Table { name, columns })
                .map_err(de::Error::custom)?;
        }
        Ok(schema)
    }
}
