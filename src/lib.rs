//! bvlstore - append-only snapshot store for BVL quotations.
//!
//! This crate persists periodic snapshots of Lima Stock Exchange (BVL)
//! quotations in a SQLite time series and serves the two access patterns
//! the schema's indexes imply: time-range scans over the scrape timestamp
//! and equality lookups by company code.
//!
//! # Architecture
//!
//! The crate uses a hexagonal layout:
//!
//! - **`domain`** - snapshot types ([`domain::Snapshot`],
//!   [`domain::NewSnapshot`]) and identifier newtypes
//! - **`port`** - the [`port::outbound::store::SnapshotStore`] trait:
//!   insert, capture-batch insert, time-range and company queries
//! - **`adapter`** - the SQLite/Diesel store implementation and the clap CLI
//!
//! # Semantics
//!
//! The store is append-only. A row is written exactly once at ingestion and
//! never mutated; the UNIQUE (`company_name`, `scrape_timestamp`) constraint
//! rejects duplicate captures with [`error::Error::Duplicate`] instead of
//! upserting, so re-run ingestions are visible to the caller.
//!
//! # Example
//!
//! ```no_run
//! use bvlstore::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
//! use bvlstore::adapter::outbound::sqlite::store::SqliteSnapshotStore;
//! use bvlstore::domain::{CompanyCode, NewSnapshot};
//! use bvlstore::port::outbound::store::SnapshotStore;
//!
//! # async fn demo() -> bvlstore::error::Result<()> {
//! let pool = create_pool("sqlite://bvl.db", 5)?;
//! run_migrations(&pool)?;
//! let store = SqliteSnapshotStore::new(pool);
//!
//! let snapshot = NewSnapshot::new(
//!     CompanyCode::new(73),
//!     "CREDICORP LTD.",
//!     chrono::Utc::now(),
//! );
//! let id = store.insert(&snapshot).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
