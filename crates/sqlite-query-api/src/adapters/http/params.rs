use crate::{
    config::ServiceConfig,
    core::{
        limits::effective_limit,
        types::{QuerySpec, SortDirection},
    },
    error::{AppError, AppResult},
};

/// First value for an exact key, with an empty value treated as absent.
fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

/// Combines configured defaults with the request's query string. Request
/// values always win; absent ones fall back to the configuration.
pub fn merge(
    config: &ServiceConfig,
    columns: Vec<String>,
    pairs: Vec<(String, String)>,
) -> AppResult<QuerySpec> {
    let sort_column = first(&pairs, "sort")
        .map(str::to_string)
        .or_else(|| config.default_sort.clone());

    let sort_direction = match first(&pairs, "order") {
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| AppError::InvalidSortDirection(raw.to_string()))?,
        None => config.default_order,
    };

    let limit = effective_limit(first(&pairs, "limit"), config.default_limit)?;

    Ok(QuerySpec {
        table: config.table.clone(),
        columns,
        filters: pairs,
        sort_column,
        sort_direction,
        limit,
    })
}
