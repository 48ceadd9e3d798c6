use rusqlite::{params_from_iter, Connection};

use crate::core::{
    ident::{eq_fold, find_fold, quote_ident},
    rows::map_rows,
    types::{BuiltQuery, ColumnInfo, QuerySpec, ResultRow},
};
use crate::error::{AppError, AppResult};

/// Query-string keys that configure the query instead of filtering it.
pub const RESERVED_PARAMS: [&str; 3] = ["sort", "order", "limit"];

/// Picks the filter predicates for a request: one per whitelisted column, in
/// whitelist order, using the first non-empty value whose key matches.
///
/// Reserved keys and keys that match no whitelisted column are dropped.
pub fn resolve_filters<'a>(
    columns: &'a [String],
    pairs: &'a [(String, String)],
) -> Vec<(&'a str, &'a str)> {
    let mut out = Vec::new();
    for column in columns {
        let hit = pairs.iter().find(|(key, value)| {
            !RESERVED_PARAMS.contains(&key.as_str())
                && !value.is_empty()
                && eq_fold(column, key)
        });
        if let Some((_, value)) = hit {
            out.push((column.as_str(), value.as_str()));
        }
    }
    out
}

/// Turns a request into a parameterized SELECT.
///
/// Identifiers come from the whitelist only; every filter value is bound.
pub fn build(spec: &QuerySpec) -> AppResult<BuiltQuery> {
    let sort = match spec.sort_column.as_deref() {
        Some(requested) => Some(
            find_fold(&spec.columns, requested)
                .ok_or_else(|| AppError::InvalidSortColumn(requested.to_string()))?,
        ),
        None => None,
    };

    let select_list = spec
        .columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!("SELECT {select_list} FROM {}", quote_ident(&spec.table));

    let filters = resolve_filters(&spec.columns, &spec.filters);
    let mut args = Vec::with_capacity(filters.len());
    if !filters.is_empty() {
        let predicates = filters
            .iter()
            .map(|(column, _)| format!("{} LIKE ?", quote_ident(column)))
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&predicates);
        args.extend(filters.iter().map(|(_, value)| format!("%{value}%")));
    }

    if let Some(column) = sort {
        sql.push_str(&format!(
            " ORDER BY {} {}",
            quote_ident(column),
            spec.sort_direction.as_sql()
        ));
    }

    if let Some(n) = spec.limit.filter(|n| *n > 0) {
        sql.push_str(&format!(" LIMIT {n}"));
    }

    Ok(BuiltQuery { sql, args })
}

pub fn run_select(
    conn: &Connection,
    query: &BuiltQuery,
    columns: &[ColumnInfo],
) -> AppResult<Vec<ResultRow>> {
    let mut stmt = conn.prepare(&query.sql)?;
    let rows = stmt.query(params_from_iter(query.args.iter()))?;
    map_rows(rows, columns)
}
