use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ingest_core::product_detail::ProductDetail;
use ingest_db::repositories::ProductDetailRepo;

use crate::error::AppResult;
use crate::middleware::api_key::ApiKey;
use crate::response::{DataResponse, ProcessedCount};
use crate::state::AppState;

/// POST /product-detail
///
/// Insert or fully overwrite the detail for (`jan`, `genpinId`).
pub async fn upsert_product_detail(
    _key: ApiKey,
    State(state): State<AppState>,
    Json(detail): Json<ProductDetail>,
) -> AppResult<impl IntoResponse> {
    let record = detail.into_record()?;
    let row = ProductDetailRepo::upsert(&state.pool, &record).await?;

    tracing::info!(jan = %row.jan, genpin_id = row.genpin_id, "Product detail upserted");

    Ok(Json(DataResponse {
        data: ProcessedCount { processed: 1 },
    }))
}
