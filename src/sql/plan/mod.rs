use crate::{
    error::Result,
    sql::{
        engine::Database,
        executor::{Executor, ResultSet},
        parser::ast::{Assignments, Condition},
        types::Value,
    },
    storage::engine::Storage,
};

pub mod planner;

/// One operation, with its clauses already parsed
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTable {
        name: String,
        /// `name:type` specs, `ID` excluded
        columns: Vec<String>,
    },
    DropTable {
        name: String,
    },
    ListTables,
    Insert {
        table_name: String,
        values: Vec<Value>,
    },
    Select {
        table_name: String,
        condition: Option<Condition>,
    },
    Update {
        table_name: String,
        assignments: Assignments,
        /// None updates every record
        condition: Option<Condition>,
    },
    Delete {
        table_name: String,
        /// None deletes every record
        condition: Option<Condition>,
    },
    Info {
        name: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateTable { .. } => "create_table",
            Command::DropTable { .. } => "drop_table",
            Command::ListTables => "list_tables",
            Command::Insert { .. } => "insert",
            Command::Select { .. } => "select",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
            Command::Info { .. } => "info",
        }
    }

    /// Whether the command destroys data and deserves a confirmation prompt
    pub fn is_destructive(&self) -> bool {
        matches!(self, Command::DropTable { .. } | Command::Delete { .. })
    }

    pub fn execute<S: Storage + 'static>(self, db: &Database<S>) -> Result<ResultSet> {
        <dyn Executor<S>>::build(self).execute(db)
    }
}
