//! Terminal rendering for snapshot listings.
//!
//! Human-readable output goes through `tabled`; `--json` callers get the
//! serialized domain types instead and never touch this module.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::{CompanyRef, Snapshot};

/// One table line per snapshot.
#[derive(Tabled)]
pub struct SnapshotLine {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "code")]
    code: String,
    #[tabled(rename = "company")]
    company: String,
    #[tabled(rename = "ticker")]
    ticker: String,
    #[tabled(rename = "last")]
    last: String,
    #[tabled(rename = "change %")]
    change: String,
    #[tabled(rename = "scraped at")]
    scraped_at: String,
}

fn or_dash<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "-".into(), ToString::to_string)
}

impl From<&Snapshot> for SnapshotLine {
    fn from(snapshot: &Snapshot) -> Self {
        let record = &snapshot.record;
        Self {
            id: snapshot.id.to_string(),
            code: record.company_code.to_string(),
            company: record.company_name.clone(),
            ticker: or_dash(&record.nemonico),
            last: or_dash(&record.last_price),
            change: or_dash(&record.percentage_change),
            scraped_at: record.scrape_timestamp.to_rfc3339(),
        }
    }
}

/// Render a snapshot listing as a table.
#[must_use]
pub fn snapshot_table(snapshots: &[Snapshot]) -> String {
    Table::new(snapshots.iter().map(SnapshotLine::from))
        .with(Style::sharp())
        .to_string()
}

/// One table line per distinct company.
#[derive(Tabled)]
pub struct CompanyLine {
    #[tabled(rename = "code")]
    code: String,
    #[tabled(rename = "company")]
    name: String,
}

impl From<&CompanyRef> for CompanyLine {
    fn from(company: &CompanyRef) -> Self {
        Self {
            code: company.code.to_string(),
            name: company.name.clone(),
        }
    }
}

/// Render a company listing as a table.
#[must_use]
pub fn company_table(companies: &[CompanyRef]) -> String {
    Table::new(companies.iter().map(CompanyLine::from))
        .with(Style::sharp())
        .to_string()
}

/// Print a dimmed informational line (empty results, counts).
pub fn note(message: &str) {
    println!("{}", message.dimmed());
}

/// Print a highlighted summary line.
pub fn summary(label: &str, message: &str) {
    println!("{} {message}", label.green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyCode, NewSnapshot};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_table_shows_dash_for_absent_fields() {
        let snap = Snapshot {
            id: crate::domain::SnapshotId::new(1),
            record: NewSnapshot::new(
                CompanyCode::new(73),
                "CREDICORP LTD.",
                Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap(),
            ),
        };

        let table = snapshot_table(&[snap]);
        assert!(table.contains("CREDICORP LTD."));
        assert!(table.contains('-'));
    }

    #[test]
    fn snapshot_table_keeps_decimal_scale() {
        let mut record = NewSnapshot::new(
            CompanyCode::new(73),
            "CREDICORP LTD.",
            Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap(),
        );
        record.last_price = Some(dec!(12.3400));
        let snap = Snapshot {
            id: crate::domain::SnapshotId::new(7),
            record,
        };

        let table = snapshot_table(&[snap]);
        assert!(table.contains("12.3400"));
    }

    #[test]
    fn company_table_lists_codes_and_names() {
        let companies = vec![CompanyRef {
            code: CompanyCode::new(12),
            name: "ALICORP S.A.A.".into(),
        }];
        let table = company_table(&companies);
        assert!(table.contains("12"));
        assert!(table.contains("ALICORP S.A.A."));
    }
}
