use std::fmt::{self, Display};

use crate::{
    error::Result,
    sql::{
        engine::Database,
        executor::{
            mutation::{Delete, Insert, Update},
            query::Scan,
            schema::{CreateTable, DropTable, Info, ListTables},
        },
        plan::Command,
        types::Record,
    },
    storage::engine::Storage,
};

pub mod filter;
mod mutation;
mod query;
mod schema;

/// Command executor
pub trait Executor<S: Storage> {
    fn execute(self: Box<Self>, db: &Database<S>) -> Result<ResultSet>;
}

/// Builds the executor for a command
impl<S: Storage + 'static> dyn Executor<S> {
    pub fn build(command: Command) -> Box<dyn Executor<S>> {
        match command {
            Command::CreateTable { name, columns } => CreateTable::new(name, columns),
            Command::DropTable { name } => DropTable::new(name),
            Command::ListTables => ListTables::new(),
            Command::Insert { table_name, values } => Insert::new(table_name, values),
            Command::Select { table_name, condition } => Scan::new(table_name, condition),
            Command::Update {
                table_name,
                assignments,
                condition,
            } => Update::new(table_name, assignments, condition),
            Command::Delete { table_name, condition } => Delete::new(table_name, condition),
            Command::Info { name } => Info::new(name),
        }
    }
}

/// Execution result set
#[derive(Debug, PartialEq)]
pub enum ResultSet {
    CreateTable {
        table_name: String,
        columns: Vec<String>,
    },
    DropTable {
        table_name: String,
    },
    ListTables {
        tables: Vec<String>,
    },
    Insert {
        table_name: String,
        id: i64,
    },
    Scan {
        columns: Vec<String>,
        rows: Vec<Record>,
    },
    /// `count` is the number of records changed; zero means nothing was written
    Update {
        table_name: String,
        count: usize,
    },
    /// `count` is the number of records removed; zero means nothing was written
    Delete {
        table_name: String,
        count: usize,
    },
    Info {
        table_name: String,
        columns: Vec<String>,
        count: usize,
    },
}

impl Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultSet::CreateTable { table_name, columns } => write!(
                f,
                "Table \"{}\" created with columns: {}",
                table_name,
                columns.join(", ")
            ),
            ResultSet::DropTable { table_name } => write!(f, "Table \"{}\" dropped.", table_name),
            ResultSet::ListTables { tables } if tables.is_empty() => f.write_str("No tables."),
            ResultSet::ListTables { tables } => {
                f.write_str("Tables:")?;
                for table in tables {
                    write!(f, "\n- {}", table)?;
                }
                Ok(())
            }
            ResultSet::Insert { table_name, id } => {
                write!(f, "Record with ID={} inserted into \"{}\".", id, table_name)
            }
            ResultSet::Scan { rows, .. } if rows.is_empty() => f.write_str("No records found."),
            ResultSet::Scan { columns, rows } => write_grid(f, columns, rows),
            ResultSet::Update { count: 0, .. } => f.write_str("No records to update."),
            ResultSet::Update { table_name, count } => {
                write!(f, "Updated {} record(s) in \"{}\".", count, table_name)
            }
            ResultSet::Delete { count: 0, .. } => f.write_str("No records to delete."),
            ResultSet::Delete { table_name, count } => {
                write!(f, "Deleted {} record(s) from \"{}\".", count, table_name)
            }
            ResultSet::Info {
                table_name,
                columns,
                count,
            } => write!(
                f,
                "Table: {}\nColumns: {}\nRecords: {}",
                table_name,
                columns.join(", "),
                count
            ),
        }
    }
}

/// Renders rows as an ASCII grid in column order; absent fields print empty
fn write_grid(f: &mut fmt::Formatter<'_>, columns: &[String], rows: &[Record]) -> fmt::Result {
    let cells = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let widths = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain([c.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let line = |f: &mut fmt::Formatter<'_>, values: &[String]| -> fmt::Result {
        f.write_str("|")?;
        for (value, width) in values.iter().zip(&widths) {
            write!(f, " {:<width$} |", value, width = *width)?;
        }
        f.write_str("\n")
    };

    writeln!(f, "+{}+", border)?;
    line(f, columns)?;
    writeln!(f, "+{}+", border)?;
    for row in &cells {
        line(f, row.as_slice())?;
    }
    write!(f, "+{}+", border)
}

#[cfg(test)]
mod tests {
    use super::ResultSet;
    use crate::sql::types::{Record, Value};

    #[test]
    fn test_result_set_messages() {
        assert_eq!(
            ResultSet::Info {
                table_name: "t".into(),
                columns: vec!["ID:int".into(), "name:str".into()],
                count: 0,
            }
            .to_string(),
            "Table: t\nColumns: ID:int, name:str\nRecords: 0"
        );
        assert_eq!(ResultSet::ListTables { tables: vec![] }.to_string(), "No tables.");
        assert_eq!(
            ResultSet::ListTables { tables: vec!["a".into(), "b".into()] }.to_string(),
            "Tables:\n- a\n- b"
        );
        assert_eq!(
            ResultSet::Update { table_name: "t".into(), count: 0 }.to_string(),
            "No records to update."
        );
        assert_eq!(
            ResultSet::Scan { columns: vec!["ID".into()], rows: vec![] }.to_string(),
            "No records found."
        );
    }

    #[test]
    fn test_result_set_grid() {
        let rows = vec![
            Record::from([
                ("ID".to_string(), Value::Integer(1)),
                ("name".to_string(), Value::from("Ann")),
            ]),
            Record::from([("ID".to_string(), Value::Integer(12))]),
        ];
        let grid = ResultSet::Scan {
            columns: vec!["ID".into(), "name".into()],
            rows,
        }
        .to_string();
        assert_eq!(
            grid,
            "+----+------+\n\
             | ID | name |\n\
             +----+------+\n\
             | 1  | Ann  |\n\
             | 12 |      |\n\
             +----+------+"
        );
    }
}
