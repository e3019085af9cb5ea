//! Persistence for the schema and per-table records
//!
//! - `engine`: the `Storage` trait
//! - `file`: JSON documents on disk
//! - `memory`: in-process maps
//! - `cache`: optional LRU of table contents

pub mod cache;
pub mod engine;
pub mod file;
pub mod memory;
