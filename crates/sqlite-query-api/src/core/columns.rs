use crate::core::{ident::contains_fold, types::ColumnInfo};
use crate::error::{AppError, AppResult};

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_column_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the column whitelist: introspected names minus `exclude`, in
/// introspection order.
pub fn filter_columns(columns: &[ColumnInfo], exclude: &[String]) -> AppResult<Vec<String>> {
    let allowed: Vec<String> = columns
        .iter()
        .filter(|c| !contains_fold(exclude, &c.name))
        .map(|c| c.name.clone())
        .collect();

    if allowed.is_empty() {
        return Err(AppError::NoColumnsAvailable);
    }
    Ok(allowed)
}
