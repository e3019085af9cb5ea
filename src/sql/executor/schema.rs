use log::info;

use crate::{
    error::{Error, Result},
    sql::{engine::Database, executor::{Executor, ResultSet}, schema::Table},
    storage::engine::Storage,
};

/// create_table executor
pub struct CreateTable {
    name: String,
    columns: Vec<String>,
}

impl CreateTable {
    pub fn new(name: String, columns: Vec<String>) -> Box<Self> {
        Box::new(Self { name, columns })
    }
}

impl<S: Storage> Executor<S> for CreateTable {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        let _guard = db.lock_schema();
        let mut schema = db.load_schema()?;
        if schema.contains(&self.name) {
            return Err(Error::TableAlreadyExists(self.name));
        }

        // Prepends the ID column and validates every spec
        let table = Table::from_specs(&self.name, &self.columns)?;
        let columns = table.column_specs();
        schema.insert(table)?;
        db.save_schema(&schema)?;

        info!("created table {} ({})", self.name, columns.join(", "));
        Ok(ResultSet::CreateTable {
            table_name: self.name,
            columns,
        })
    }
}

/// drop_table executor
///
/// Removes the schema entry only. The table's record document stays where it
/// is, and a later table created under the same name reads it again.
pub struct DropTable {
    name: String,
}

impl DropTable {
    pub fn new(name: String) -> Box<Self> {
        Box::new(Self { name })
    }
}

impl<S: Storage> Executor<S> for DropTable {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        let _guard = db.lock_schema();
        let mut schema = db.load_schema()?;
        schema.remove(&self.name)?;
        db.save_schema(&schema)?;
        db.invalidate(&self.name);

        info!("dropped table {}", self.name);
        Ok(ResultSet::DropTable { table_name: self.name })
    }
}

/// list_tables executor
pub struct ListTables;

impl ListTables {
    pub fn new() -> Box<Self> {
        Box::new(Self)
    }
}

impl<S: Storage> Executor<S> for ListTables {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        Ok(ResultSet::ListTables {
            tables: db.load_schema()?.table_names(),
        })
    }
}

/// info executor - columns and record count of one table
pub struct Info {
    name: String,
}

impl Info {
    pub fn new(name: String) -> Box<Self> {
        Box::new(Self { name })
    }
}

impl<S: Storage> Executor<S> for Info {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        let lock = db.table_lock(&self.name);
        let _guard = lock.lock();

        let schema = db.load_schema()?;
        let columns = schema.must_get(&self.name)?.column_specs();
        let count = db.load_records(&self.name)?.len();
        Ok(ResultSet::Info {
            table_name: self.name,
            columns,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, Result},
        sql::{engine::Database, executor::ResultSet, plan::Command, types::Value},
        storage::{engine::Storage, memory::MemoryStorage},
    };

    fn create(name: &str, columns: &[&str]) -> Command {
        Command::CreateTable {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_create_table_and_info() -> Result<()> {
        let db = Database::new(MemoryStorage::new());
        assert_eq!(
            create("t", &["name:str"]).execute(&db)?,
            ResultSet::CreateTable {
                table_name: "t".into(),
                columns: vec!["ID:int".into(), "name:str".into()],
            }
        );
        assert_eq!(
            Command::Info { name: "t".into() }.execute(&db)?,
            ResultSet::Info {
                table_name: "t".into(),
                columns: vec!["ID:int".into(), "name:str".into()],
                count: 0,
            }
        );
        Ok(())
    }

    #[test]
    fn test_create_table_errors_leave_schema_unchanged() -> Result<()> {
        let db = Database::new(MemoryStorage::new());
        create("t", &["a:int"]).execute(&db)?;

        assert!(matches!(
            create("t", &["b:str"]).execute(&db),
            Err(Error::TableAlreadyExists(_))
        ));
        assert!(matches!(
            create("u", &["a:int", "broken"]).execute(&db),
            Err(Error::MalformedColumnSpec(_))
        ));
        assert!(matches!(
            create("u", &["a:float"]).execute(&db),
            Err(Error::UnsupportedColumnType { .. })
        ));

        let schema = db.storage().load_schema()?;
        assert_eq!(schema.table_names(), vec!["t"]);
        assert_eq!(schema.must_get("t")?.column_specs(), vec!["ID:int", "a:int"]);
        Ok(())
    }

    #[test]
    fn test_list_and_drop_tables() -> Result<()> {
        let db = Database::new(MemoryStorage::new());
        assert_eq!(Command::ListTables.execute(&db)?, ResultSet::ListTables { tables: vec![] });

        create("b", &["x:int"]).execute(&db)?;
        create("a", &["y:bool"]).execute(&db)?;
        assert_eq!(
            Command::ListTables.execute(&db)?,
            ResultSet::ListTables { tables: vec!["b".into(), "a".into()] }
        );

        Command::DropTable { name: "b".into() }.execute(&db)?;
        assert_eq!(
            Command::ListTables.execute(&db)?,
            ResultSet::ListTables { tables: vec!["a".into()] }
        );
        assert!(matches!(
            Command::DropTable { name: "b".into() }.execute(&db),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            Command::Info { name: "b".into() }.execute(&db),
            Err(Error::TableNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_drop_table_keeps_records() -> Result<()> {
        let db = Database::new(MemoryStorage::new());
        create("t", &["v:int"]).execute(&db)?;
        Command::Insert {
            table_name: "t".into(),
            values: vec![Value::Integer(7)],
        }
        .execute(&db)?;

        Command::DropTable { name: "t".into() }.execute(&db)?;
        assert!(db.storage().has_records("t"));

        // Recreating the table picks the old records back up
        create("t", &["v:int"]).execute(&db)?;
        match (Command::Info { name: "t".into() }).execute(&db)? {
            ResultSet::Info { count, .. } => assert_eq!(count, 1),
            other => panic!("unexpected result {:?}", other),
        }
        Ok(())
    }
}
