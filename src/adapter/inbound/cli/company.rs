//! Handlers for the `company` and `companies` commands.

use crate::adapter::inbound::cli::command::CompanyArgs;
use crate::adapter::inbound::cli::render;
use crate::adapter::outbound::sqlite::store::SqliteSnapshotStore;
use crate::domain::CompanyCode;
use crate::error::Result;
use crate::port::outbound::store::SnapshotStore;

/// Execute the company command.
pub async fn execute(store: &SqliteSnapshotStore, args: &CompanyArgs, json: bool) -> Result<()> {
    let code = CompanyCode::new(args.code);

    let snapshots = if args.latest {
        store.latest_for_company(code).await?.into_iter().collect()
    } else {
        store.list_by_company(code).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else if snapshots.is_empty() {
        render::note(&format!("no snapshots for company {code}"));
    } else {
        println!("{}", render::snapshot_table(&snapshots));
    }
    Ok(())
}

/// Execute the companies command.
pub async fn execute_companies(store: &SqliteSnapshotStore, json: bool) -> Result<()> {
    let companies = store.companies().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&companies)?);
    } else if companies.is_empty() {
        render::note("store is empty");
    } else {
        println!("{}", render::company_table(&companies));
    }
    Ok(())
}
