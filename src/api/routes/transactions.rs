//! Transaction Routes
//!
//! - GET /api/transactions - Filtered, paginated transaction list

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::TransactionParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::transaction::TransactionPage;

/// GET /api/transactions?page&limit&search&type
///
/// `search` matches details or phone number; `type` is an exact type name.
/// Pages past the end come back empty with the real page count. A query
/// string that does not deserialize is a validation error.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TransactionParams>, QueryRejection>,
) -> ApiResult<Json<TransactionPage>> {
    let Query(params) = params?;
    let query = params.into_query(&state.config)?;
    let page = state.store.query(&query);

    tracing::debug!(
        page = query.page,
        limit = query.limit,
        search = %query.search,
        type_filter = %query.type_filter,
        total = page.total,
        "Listed transactions"
    );

    Ok(Json(page))
}
