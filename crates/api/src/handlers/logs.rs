//! Handler for client-side network event batches.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ingest_core::log_event::{prepare_batch, LogBatch};
use ingest_db::repositories::LogEventRepo;

use crate::error::AppResult;
use crate::middleware::api_key::ApiKey;
use crate::response::{DataResponse, InsertedCount};
use crate::state::AppState;

/// POST /ingest
///
/// Append every event of the batch as its own row. One invalid event rejects
/// the whole batch before anything is written.
pub async fn ingest_logs(
    _key: ApiKey,
    State(state): State<AppState>,
    Json(batch): Json<LogBatch>,
) -> AppResult<impl IntoResponse> {
    let records = prepare_batch(batch.items)?;
    let inserted = LogEventRepo::insert_batch(&state.pool, &records).await?;

    tracing::info!(inserted, "Log batch ingested");

    Ok(Json(DataResponse {
        data: InsertedCount { inserted },
    }))
}
