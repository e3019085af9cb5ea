use log::{info, warn};

use crate::{
    error::{Error, Result},
    sql::{
        engine::Database,
        executor::{filter::matches, Executor, ResultSet},
        parser::ast::{Assignments, Condition},
        schema::ID_COLUMN,
        types::{coerce, Record, Value},
    },
    storage::engine::Storage,
};

/// insert executor
pub struct Insert {
    table_name: String,
    values: Vec<Value>,
}

impl Insert {
    pub fn new(table_name: String, values: Vec<Value>) -> Box<Self> {
        Box::new(Self { table_name, values })
    }
}

/// Next identifier: one past the largest in use, 1 for an empty table
fn next_id(table: &str, records: &[Record]) -> Result<i64> {
    records
        .iter()
        .filter_map(|r| r.get(ID_COLUMN).and_then(Value::as_integer))
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| Error::IdExhausted(table.to_string()))
}

impl<S: Storage> Executor<S> for Insert {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        let lock = db.table_lock(&self.table_name);
        let _guard = lock.lock();

        let schema = db.load_schema()?;
        let table = schema.must_get(&self.table_name)?;
        let columns = table.value_columns();
        if self.values.len() != columns.len() {
            return Err(Error::ArityMismatch {
                expected: columns.len(),
                actual: self.values.len(),
            });
        }

        let mut records = db.load_records(&self.table_name)?;
        let id = next_id(&self.table_name, &records)?;

        // Values bind positionally; any failed coercion aborts the whole insert
        let mut record = Record::from([(ID_COLUMN.to_string(), Value::Integer(id))]);
        for (column, value) in columns.iter().zip(self.values) {
            record.insert(column.name.clone(), coerce(value, column.datatype)?);
        }

        records.push(record);
        db.save_records(&self.table_name, &records)?;

        info!("inserted record ID={} into {}", id, self.table_name);
        Ok(ResultSet::Insert {
            table_name: self.table_name,
            id,
        })
    }
}

/// update executor
pub struct Update {
    table_name: String,
    assignments: Assignments,
    condition: Option<Condition>,
}

impl Update {
    pub fn new(
        table_name: String,
        assignments: Assignments,
        condition: Option<Condition>,
    ) -> Box<Self> {
        Box::new(Self {
            table_name,
            assignments,
            condition,
        })
    }
}

impl<S: Storage> Executor<S> for Update {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        let lock = db.table_lock(&self.table_name);
        let _guard = lock.lock();

        let schema = db.load_schema()?;
        let table = schema.must_get(&self.table_name)?;
        let mut records = db.load_records(&self.table_name)?;

        // Columns the table does not have are ignored, and so is ID: identifiers stay unique
        let assignments = self
            .assignments
            .iter()
            .filter(|(name, _)| name.as_str() != ID_COLUMN)
            .filter_map(|(name, value)| table.column(name).map(|c| (c, value)))
            .collect::<Vec<_>>();

        let mut count = 0;
        if !assignments.is_empty() {
            for record in records
                .iter_mut()
                .filter(|r| matches(r, self.condition.as_ref()))
            {
                for (column, value) in &assignments {
                    record.insert(column.name.clone(), coerce((*value).clone(), column.datatype)?);
                }
                count += 1;
            }
        }

        if count == 0 {
            warn!("update on {}: no records to update", self.table_name);
            return Ok(ResultSet::Update {
                table_name: self.table_name,
                count,
            });
        }

        db.save_records(&self.table_name, &records)?;
        info!("updated {} record(s) in {}", count, self.table_name);
        Ok(ResultSet::Update {
            table_name: self.table_name,
            count,
        })
    }
}

/// delete executor
pub struct Delete {
    table_name: String,
    condition: Option<Condition>,
}

impl Delete {
    pub fn new(table_name: String, condition: Option<Condition>) -> Box<Self> {
        Box::new(Self {
            table_name,
            condition,
        })
    }
}

impl<S: Storage> Executor<S> for Delete {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet> {
        let lock = db.table_lock(&self.table_name);
        let _guard = lock.lock();

        let schema = db.load_schema()?;
        schema.must_get(&self.table_name)?;

        let (removed, kept): (Vec<_>, Vec<_>) = db
            .load_records(&self.table_name)?
            .into_iter()
            .partition(|r| matches(r, self.condition.as_ref()));

        let count = removed.len();
        if count == 0 {
            warn!("delete on {}: no records to delete", self.table_name);
            return Ok(ResultSet::Delete {
                table_name: self.table_name,
                count,
            });
        }

        db.save_records(&self.table_name, &kept)?;
        info!("deleted {} record(s) from {}", count, self.table_name);
        Ok(ResultSet::Delete {
            table_name: self.table_name,
            count,
        })
    }
}
