//! Handler for the `import` command.

use tracing::{info, warn};

use crate::adapter::inbound::cli::command::ImportArgs;
use crate::adapter::inbound::cli::render;
use crate::adapter::outbound::sqlite::store::SqliteSnapshotStore;
use crate::domain::NewSnapshot;
use crate::error::Result;
use crate::port::outbound::store::SnapshotStore;

/// Execute the import command.
///
/// Without `--skip-duplicates` the whole file is inserted as one capture
/// transaction: any duplicate aborts and nothing is written. With the flag,
/// rows insert one by one and duplicate-key rejections are logged and
/// counted instead of aborting, which is what a re-run ingestion wants.
pub async fn execute(store: &SqliteSnapshotStore, args: &ImportArgs, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)?;
    let snapshots: Vec<NewSnapshot> = serde_json::from_str(&content)?;
    info!(
        file = %args.file.display(),
        rows = snapshots.len(),
        "importing capture file"
    );

    let (inserted, skipped) = if args.skip_duplicates {
        let mut inserted = 0usize;
        let mut skipped = 0usize;
        for snapshot in &snapshots {
            match store.insert(snapshot).await {
                Ok(_) => inserted += 1,
                Err(e) if e.is_duplicate() => {
                    warn!(
                        company = %snapshot.company_name,
                        scraped = %snapshot.scrape_timestamp,
                        "skipping duplicate snapshot"
                    );
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        (inserted, skipped)
    } else {
        let ids = store.insert_capture(&snapshots).await?;
        (ids.len(), 0)
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "inserted": inserted, "skipped": skipped })
        );
    } else {
        render::summary("import:", &format!("{inserted} inserted, {skipped} skipped"));
    }
    Ok(())
}
