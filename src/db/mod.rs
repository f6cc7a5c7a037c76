//! Database module
//!
//! SQLite connection pool and table migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
