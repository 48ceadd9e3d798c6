use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    core::{columns::filter_columns, query, types::ResultRow},
    error::{AppError, AppResult},
};

use super::{params, AppState};

type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Serves `/<table>`. Any failure short-circuits to an error response.
pub async fn table_rows(
    State(state): State<AppState>,
    method: Method,
    raw_query: QueryPairs,
) -> Response {
    match fetch_rows(&state, method, raw_query).await.and_then(|rows| to_json(&rows)) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            if e.is_client_error() {
                tracing::warn!(code = e.code(), error = %e, "rejected request");
            } else {
                tracing::error!(code = e.code(), error = %e, "request failed");
            }
            e.into_response()
        }
    }
}

async fn fetch_rows(
    state: &AppState,
    method: Method,
    raw_query: QueryPairs,
) -> AppResult<Vec<ResultRow>> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed(method.to_string()));
    }
    let Query(pairs) = raw_query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let config = &state.config;
    let columns = state.db.columns(config.table.clone()).await?;
    let allowed = filter_columns(&columns, &config.exclude)?;
    let spec = params::merge(config, allowed, pairs)?;
    let built = query::build(&spec)?;
    tracing::debug!(sql = %built.sql, args = ?built.args, "built query");

    state.db.select(built, columns).await
}

fn to_json(rows: &[ResultRow]) -> AppResult<Vec<u8>> {
    Ok(serde_json::to_vec(rows)?)
}
