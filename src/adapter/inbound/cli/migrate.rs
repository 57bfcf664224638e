//! Handler for the `migrate` command.
//!
//! Migrations run eagerly in [`cli::run`](super::run) before any command
//! dispatch, so this handler only reports the resulting state.

use crate::adapter::inbound::cli::render;
use crate::adapter::outbound::sqlite::store::SqliteSnapshotStore;
use crate::config::Config;
use crate::error::Result;
use crate::port::outbound::store::SnapshotStore;

/// Execute the migrate command.
pub async fn execute(store: &SqliteSnapshotStore, config: &Config, json: bool) -> Result<()> {
    let rows = store.count().await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "database": config.database.path.display().to_string(),
                "rows": rows,
            })
        );
    } else {
        render::summary(
            "migrated:",
            &format!("{} ({rows} rows)", config.database.path.display()),
        );
    }
    Ok(())
}
