//! Persistence port for quotation snapshots.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{CompanyCode, CompanyRef, NewSnapshot, Snapshot, SnapshotId};
use crate::error::Result;

/// Storage operations for quotation snapshots.
///
/// The store is append-only: inserts never replace or modify an existing
/// row, and a (`company_name`, `scrape_timestamp`) collision fails with
/// [`Error::Duplicate`](crate::error::Error::Duplicate) rather than
/// upserting. Transient storage failures are surfaced to the caller; the
/// store itself never retries.
pub trait SnapshotStore: Send + Sync {
    /// Append one snapshot. Returns the storage-assigned id.
    fn insert(&self, snapshot: &NewSnapshot) -> impl Future<Output = Result<SnapshotId>> + Send;

    /// Append one capture event's worth of snapshots in a single
    /// transaction. Any duplicate rolls back the whole batch.
    fn insert_capture(
        &self,
        snapshots: &[NewSnapshot],
    ) -> impl Future<Output = Result<Vec<SnapshotId>>> + Send;

    /// Snapshots with `scrape_timestamp` in the closed interval
    /// `[start, end]`, ordered by `scrape_timestamp` then id.
    fn list_by_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<Snapshot>>> + Send;

    /// Every snapshot for the given company, ordered by `scrape_timestamp`
    /// then id.
    fn list_by_company(
        &self,
        code: CompanyCode,
    ) -> impl Future<Output = Result<Vec<Snapshot>>> + Send;

    /// Most recent snapshot for the given company, if any.
    fn latest_for_company(
        &self,
        code: CompanyCode,
    ) -> impl Future<Output = Result<Option<Snapshot>>> + Send;

    /// Distinct companies present in the store, ordered by name.
    fn companies(&self) -> impl Future<Output = Result<Vec<CompanyRef>>> + Send;

    /// Total number of stored snapshots.
    fn count(&self) -> impl Future<Output = Result<i64>> + Send;
}
