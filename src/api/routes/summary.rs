//! Summary Routes
//!
//! - GET /api/summary - Aggregate snapshot as JSON
//! - GET /static/xml/data.xml - Aggregate snapshot document

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::io::ErrorKind;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::snapshot::{write_snapshot, AggregateSnapshot};

/// GET /api/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<AggregateSnapshot> {
    Json(state.summary.as_ref().clone())
}

/// GET /static/xml/data.xml
///
/// Serves the configured snapshot file when there is one, otherwise the
/// snapshot computed from the loaded transactions.
pub async fn snapshot_xml(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let body = match &state.snapshot_file {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ApiError::NotFound(format!("Snapshot file {} does not exist", path.display()))
            } else {
                ApiError::Io(e)
            }
        })?,
        None => write_snapshot(&state.summary)?,
    };

    Ok(([(header::CONTENT_TYPE, "application/xml")], body).into_response())
}
