use std::path::PathBuf;

use clap::Parser;

use crate::core::types::SortDirection;

const AFTER_HELP: &str = "\
Examples:
  sqlite-query-api -t clients -s name -o desc -l 20
  sqlite-query-api --table products --exclude id,stock --sort price --limit 50

URL access:
  http://localhost:8080/clients?name=Pamela
  http://localhost:8080/products?limit=10";

/// API for secure querying of SQLite databases
#[derive(Parser, Debug, Clone)]
#[command(name = "sqlite-query-api", version, after_help = AFTER_HELP)]
pub struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, value_name = "PATH", default_value = "./data.db")]
    pub db: PathBuf,

    /// Port for the HTTP server
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Name of the table to query (required)
    #[arg(short, long, value_name = "TABLE")]
    pub table: Option<String>,

    /// Columns to exclude (comma-separated)
    #[arg(short, long, value_name = "COLS", default_value = "")]
    pub exclude: String,

    /// Default column for sorting
    #[arg(short, long, value_name = "COL", default_value = "")]
    pub sort: String,

    /// Default sorting direction
    #[arg(short, long, value_enum, value_name = "DIR", default_value_t = SortDirection::Asc)]
    pub order: SortDirection,

    /// Default number of results to return (0 for all)
    #[arg(short, long, value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    pub limit: i64,

    /// Logging level (stderr). Also supports RUST_LOG.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
