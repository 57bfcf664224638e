//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed snapshot store and its supporting database
//! plumbing (connection pool, schema, row models) using Diesel ORM.

pub mod database;
pub mod store;
