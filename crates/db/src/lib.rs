//! Database layer for the Fundatlas fund directory.
//!
//! Provides SQLite storage with schema migrations and typed query helpers.

pub mod models;
pub mod pool;
pub mod queries;

pub use pool::DbPool;
