//! Query and record engine
//!
//! - `types`: data types, values, records and type coercion
//! - `schema`: column and table definitions
//! - `parser`: value and clause parsing
//! - `plan`: commands and the command-line planner
//! - `executor`: the CRUD operations and the condition evaluator
//! - `engine`: database handle, table locks and sessions

pub mod engine;
pub mod executor;
pub mod parser;
pub mod plan;
pub mod schema;
pub mod types;
