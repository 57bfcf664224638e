//! Command-line interface for the snapshot store.

pub mod command;
mod company;
mod import;
mod migrate;
mod range;
mod render;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::store::SqliteSnapshotStore;
use crate::config::Config;
use crate::error::Result;

use command::{Cli, Commands};

/// Resolve configuration, open the store and dispatch the subcommand.
///
/// Migrations run before every command so a fresh database path works
/// without an explicit `migrate` first.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.database.path = database.clone();
    }
    config.init_logging();

    if let Some(dir) = config.database.path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let url = format!("sqlite://{}", config.database.path.display());
    let pool = create_pool(&url, config.database.pool_size)?;
    run_migrations(&pool)?;
    let store = SqliteSnapshotStore::new(pool);

    match &cli.command {
        Commands::Migrate => migrate::execute(&store, &config, cli.json).await,
        Commands::Import(args) => import::execute(&store, args, cli.json).await,
        Commands::Range(args) => range::execute(&store, args, cli.json).await,
        Commands::Company(args) => company::execute(&store, args, cli.json).await,
        Commands::Companies => company::execute_companies(&store, cli.json).await,
    }
}
