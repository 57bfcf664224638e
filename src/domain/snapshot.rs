//! Quotation snapshot domain types.
//!
//! A snapshot is one observation of a listed company's trading state at a
//! single capture event. Snapshots form an append-only time series: a row is
//! written exactly once at ingestion and never mutated afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CompanyCode, SnapshotId};

/// A snapshot awaiting insertion (not yet assigned an id).
///
/// Only `company_code`, `company_name` and `scrape_timestamp` are required;
/// every other field may be absent because upstream data is routinely
/// incomplete at capture time (instruments that have not traded yet carry no
/// prices at all).
///
/// Serialized field names follow the upstream BVL API casing
/// (`companyName`, `sectorDescription`, ...), so a captured API frame can be
/// fed back in as a JSON import file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSnapshot {
    /// Issuer code; repeats across capture events.
    pub company_code: CompanyCode,
    /// Full legal name of the issuer. Part of the store's uniqueness key.
    pub company_name: String,
    pub short_name: Option<String>,
    /// Ticker symbol ("nemonico" in BVL terminology).
    pub nemonico: Option<String>,
    pub sector_code: Option<String>,
    pub sector_description: Option<String>,
    /// Most recent trading session reflected in this row.
    pub last_date: Option<DateTime<Utc>>,
    /// Prior trading session.
    pub previous_date: Option<DateTime<Utc>>,
    pub buy_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub minimum_price: Option<Decimal>,
    pub maximum_price: Option<Decimal>,
    pub opening_price: Option<Decimal>,
    pub previous_price: Option<Decimal>,
    /// Ex-rights price ("exderecho").
    pub exderecho: Option<Decimal>,
    pub negotiated_quantity: Option<i64>,
    pub negotiated_amount: Option<Decimal>,
    pub negotiated_national_amount: Option<Decimal>,
    /// Signed change vs. the previous session.
    pub percentage_change: Option<Decimal>,
    pub operations_number: Option<i32>,
    pub currency: Option<String>,
    pub unity: Option<i32>,
    pub segment: Option<String>,
    pub num_neg: Option<i32>,
    /// Timestamp the record was established by the source system.
    /// Stored verbatim when present; the store never synthesizes it.
    pub created_date: Option<DateTime<Utc>>,
    /// Capture time assigned by the ingesting process. Required.
    pub scrape_timestamp: DateTime<Utc>,
}

impl NewSnapshot {
    /// Create a snapshot with the required fields; optional fields start
    /// absent and are filled by plain struct assignment.
    pub fn new(
        company_code: CompanyCode,
        company_name: impl Into<String>,
        scrape_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            company_code,
            company_name: company_name.into(),
            scrape_timestamp,
            ..Self::default()
        }
    }
}

/// A persisted snapshot: a [`NewSnapshot`] plus its storage-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Storage-assigned id, immutable after insertion.
    pub id: SnapshotId,
    /// The observation itself.
    #[serde(flatten)]
    pub record: NewSnapshot,
}

impl Snapshot {
    /// Issuer code of this snapshot.
    #[must_use]
    pub fn company_code(&self) -> CompanyCode {
        self.record.company_code
    }

    /// Capture time of this snapshot.
    #[must_use]
    pub fn scrape_timestamp(&self) -> DateTime<Utc> {
        self.record.scrape_timestamp
    }
}

/// A distinct company present in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    pub code: CompanyCode,
    pub name: String,
}
