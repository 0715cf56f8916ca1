//! Handler for catalog document batches.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ingest_core::catalog::{prepare_batch, CatalogBatch};
use ingest_core::types::now_epoch_ms;
use ingest_db::repositories::CatalogDocumentRepo;

use crate::error::AppResult;
use crate::middleware::api_key::ApiKey;
use crate::response::{DataResponse, ProcessedCount};
use crate::state::AppState;

/// POST /mapcamera-search-docs
///
/// Reconcile each document against the stored row for its `genpin_id`.
/// An empty batch answers `0` without touching the database.
pub async fn ingest_docs(
    _key: ApiKey,
    State(state): State<AppState>,
    Json(batch): Json<CatalogBatch>,
) -> AppResult<impl IntoResponse> {
    batch.validate()?;

    if batch.docs.is_empty() {
        return Ok(Json(DataResponse {
            data: ProcessedCount { processed: 0 },
        }));
    }

    let records = prepare_batch(batch.docs, batch.client_ts_ms, now_epoch_ms())?;
    let summary = CatalogDocumentRepo::reconcile(&state.pool, &records).await?;

    tracing::info!(
        processed = summary.processed(),
        inserted = summary.inserted,
        overwritten = summary.overwritten,
        unchanged = summary.unchanged,
        context = batch.context.as_deref().unwrap_or("-"),
        page_url = batch.page_url.as_deref().unwrap_or("-"),
        "Catalog batch reconciled",
    );

    Ok(Json(DataResponse {
        data: ProcessedCount {
            processed: summary.processed(),
        },
    }))
}
