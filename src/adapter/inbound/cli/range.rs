//! Handler for the `range` command.

use chrono::{DateTime, Utc};

use crate::adapter::inbound::cli::command::RangeArgs;
use crate::adapter::inbound::cli::render;
use crate::adapter::outbound::sqlite::store::SqliteSnapshotStore;
use crate::error::{Error, Result};
use crate::port::outbound::store::SnapshotStore;

/// Parse a CLI timestamp argument as RFC 3339.
fn parse_bound(raw: &str, name: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("--{name} '{raw}' is not RFC 3339: {e}")))
}

/// Execute the range command.
pub async fn execute(store: &SqliteSnapshotStore, args: &RangeArgs, json: bool) -> Result<()> {
    let start = parse_bound(&args.start, "start")?;
    let end = parse_bound(&args.end, "end")?;
    if end < start {
        return Err(Error::Parse(format!(
            "--end {} precedes --start {}",
            args.end, args.start
        )));
    }

    let snapshots = store.list_by_time_range(start, end).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else if snapshots.is_empty() {
        render::note("no snapshots in range");
    } else {
        println!("{}", render::snapshot_table(&snapshots));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_bounds() {
        let parsed = parse_bound("2026-08-20T09:00:00Z", "start").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap());
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let parsed = parse_bound("2026-08-20T09:00:00-05:00", "start").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap());
    }

    #[test]
    fn rejects_non_rfc3339_input() {
        let err = parse_bound("20/08/2026", "start").unwrap_err();
        assert!(err.to_string().contains("--start"));
    }
}
