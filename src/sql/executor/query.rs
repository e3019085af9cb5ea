use crate::{
    error::Result,
    sql::{
        engine::Database,
        executor::{filter::matches, Executor, ResultSet},
        parser::ast::Condition,
    },
    storage::engine::Storage,
};

/// Table scan executor (select)
pub struct Scan {
    table_name: String,
    condition: Option<Condition>,
}

impl Scan {
    pub fn new(table_name: String, condition: Option<Condition>) -> Box<Self> {
        Box::new(Self { table_name, condition })
    }
}

impl<S: Storage> Executor<S> for Scan {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        let lock = db.table_lock(&self.table_name);
        let _guard = lock.lock();

        let schema = db.load_schema()?;
        let table = schema.must_get(&self.table_name)?;
        let rows = db
            .load_records(&self.table_name)?
            .into_iter()
            .filter(|r| matches(r, self.condition.as_ref()))
            .collect();
        Ok(ResultSet::Scan {
            columns: table.column_names(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, Result},
        sql::{
            engine::Database,
            executor::ResultSet,
            parser::parse_where_clause,
            plan::Command,
            types::{Record, Value},
        },
        storage::memory::MemoryStorage,
    };

    fn select(db: &Database<MemoryStorage>, clause: &str) -> Result<Vec<Record>> {
        let command = Command::Select {
            table_name: "people".into(),
            condition: parse_where_clause(clause)?,
        };
        match command.execute(db)? {
            ResultSet::Scan { rows, .. } => Ok(rows),
            other => panic!("unexpected result {:?}", other),
        }
    }

    fn setup() -> Result<Database<MemoryStorage>> {
        let db = Database::new(MemoryStorage::new());
        let mut s = db.session();
        s.execute("create_table people name:str age:int")?;
        for (name, age) in [("a", 10), ("b", 20), ("c", 30)] {
            s.execute(&format!("insert into people values ('{}', {})", name, age))?;
        }
        Ok(db)
    }

    #[test]
    fn test_select_filters_in_order() -> Result<()> {
        let db = setup()?;
        let rows = select(&db, "age > 15")?;
        let names = rows.iter().map(|r| r["name"].to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "c"]);

        assert_eq!(select(&db, "name = c")?.len(), 1);
        assert_eq!(select(&db, "missing = 1")?.len(), 0);
        Ok(())
    }

    #[test]
    fn test_select_is_repeatable() -> Result<()> {
        let db = setup()?;
        let first = select(&db, "")?;
        let second = select(&db, "")?;
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_select_columns_and_missing_table() -> Result<()> {
        let db = setup()?;
        match (Command::Select { table_name: "people".into(), condition: None }).execute(&db)? {
            ResultSet::Scan { columns, rows } => {
                assert_eq!(columns, vec!["ID", "name", "age"]);
                assert_eq!(rows[0]["ID"], Value::Integer(1));
            }
            other => panic!("unexpected result {:?}", other),
        }

        let missing = Command::Select { table_name: "nope".into(), condition: None }.execute(&db);
        assert!(matches!(missing, Err(Error::TableNotFound(_))));
        Ok(())
    }
}
