use rusqlite::{Connection, OptionalExtension, Row};

use crate::core::{
    ident::{is_safe_identifier, quote_ident},
    types::ColumnInfo,
};
use crate::error::{AppError, AppResult};

pub fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
    let found = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            [table],
            |r| r.get::<_, String>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Reads column metadata fresh on every call; nothing is cached.
pub fn list_columns(conn: &Connection, table: &str) -> AppResult<Vec<ColumnInfo>> {
    // PRAGMA arguments are not parameterizable, so only plain identifiers get through.
    if !is_safe_identifier(table) {
        return Err(AppError::InvalidTableName(table.to_string()));
    }

    let sql = format!("PRAGMA table_info({})", quote_ident(table));
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| AppError::Schema(e.to_string()))?;
    let cols = stmt
        .query_map([], |row: &Row<'_>| {
            Ok(ColumnInfo {
                ordinal: row.get("cid")?,
                name: row.get("name")?,
                decl_type: row.get::<_, Option<String>>("type")?.unwrap_or_default(),
                not_null: row.get::<_, i64>("notnull")? != 0,
                default_value: row.get("dflt_value")?,
                is_primary_key: row.get::<_, i64>("pk")? != 0,
            })
        })
        .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
        .map_err(|e| AppError::Schema(e.to_string()))?;

    // table_info yields nothing for a missing table rather than failing.
    if cols.is_empty() {
        return Err(AppError::Schema(format!("table '{table}' has no columns or does not exist")));
    }
    Ok(cols)
}
