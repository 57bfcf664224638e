//! Exchange-agnostic domain types for BVL quotation snapshots.

mod id;
mod snapshot;

pub use id::{CompanyCode, SnapshotId};
pub use snapshot::{CompanyRef, NewSnapshot, Snapshot};
