//! primdb - a minimal file-backed tabular store
//!
//! This crate provides:
//! - Tables with typed columns (`int`, `str`, `bool`) and an automatic `ID`
//! - WHERE / SET / VALUES clause parsing with type coercion
//! - Insert, select, update and delete over whole-table JSON documents
//! - Pluggable storage (JSON files or memory) with an optional record cache

pub mod config;
pub mod error;
pub mod sql;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use sql::{engine::Database, executor::ResultSet, plan::Command};
