use std::path::PathBuf;

use crate::{
    cli::Args,
    core::{
        columns::parse_column_list, connection::absolute_path, ident::is_safe_identifier,
        types::SortDirection,
    },
    error::{AppError, AppResult},
};

/// Process-wide settings, fixed at startup and shared read-only with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub table: String,
    pub exclude: Vec<String>,
    pub default_sort: Option<String>,
    pub default_order: SortDirection,
    /// Zero or negative means unbounded.
    pub default_limit: i64,
}

impl ServiceConfig {
    pub fn from_args(args: &Args) -> AppResult<Self> {
        let table = args
            .table
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingTable)?;
        if !is_safe_identifier(table) {
            return Err(AppError::InvalidTableName(table.to_string()));
        }

        let default_sort = Some(args.sort.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            db_path: absolute_path(&args.db)?,
            port: args.port,
            table: table.to_string(),
            exclude: parse_column_list(&args.exclude),
            default_sort,
            default_order: args.order,
            default_limit: args.limit,
        })
    }

    pub fn route(&self) -> String {
        format!("/{}", self.table)
    }
}
