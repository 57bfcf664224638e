//! Command-line interface definitions.
//!
//! Defines the CLI structure for the bvlstore binary using `clap`. The CLI
//! supports subcommands for schema migration, importing JSON capture files,
//! and querying the store by time window or company.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Append-only store for Lima Stock Exchange (BVL) quotation snapshots
#[derive(Parser, Debug)]
#[command(name = "bvlstore")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database path (overrides config and BVLSTORE_DATABASE)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the bvlstore CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or upgrade the database schema
    Migrate,

    /// Import a JSON capture file of snapshots
    Import(ImportArgs),

    /// List snapshots captured inside a time window
    Range(RangeArgs),

    /// List snapshots for one company
    Company(CompanyArgs),

    /// List distinct companies present in the store
    Companies,
}

/// Arguments for `bvlstore import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file holding an array of snapshots (upstream API casing)
    pub file: PathBuf,

    /// Skip rows that collide with an existing (company, scrape time) key
    /// instead of aborting; without this flag the import is one atomic
    /// transaction
    #[arg(long)]
    pub skip_duplicates: bool,
}

/// Arguments for `bvlstore range`.
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Window start, RFC 3339 (e.g. 2026-08-20T09:00:00Z)
    #[arg(long)]
    pub start: String,

    /// Window end, RFC 3339 (inclusive)
    #[arg(long)]
    pub end: String,
}

/// Arguments for `bvlstore company`.
#[derive(Args, Debug)]
pub struct CompanyArgs {
    /// Issuer company code
    pub code: i32,

    /// Only show the most recent snapshot
    #[arg(long)]
    pub latest: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn range_requires_both_bounds() {
        let result = Cli::try_parse_from(["bvlstore", "range", "--start", "2026-08-20T09:00:00Z"]);
        assert!(result.is_err());
    }

    #[test]
    fn import_parses_skip_duplicates_flag() {
        let cli =
            Cli::try_parse_from(["bvlstore", "import", "frame.json", "--skip-duplicates"]).unwrap();
        match cli.command {
            Commands::Import(args) => {
                assert!(args.skip_duplicates);
                assert_eq!(args.file, PathBuf::from("frame.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_database_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["bvlstore", "companies", "--database", "/tmp/q.db"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/q.db")));
    }
}
