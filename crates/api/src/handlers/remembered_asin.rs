use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use ingest_core::error::CoreError;
use ingest_core::remembered_asin::normalize_code;
use ingest_core::types::Timestamp;
use ingest_db::repositories::RememberedAsinRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::basic_auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RememberAsinParams {
    pub asin: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RememberedAsinResponse {
    pub asin: String,
    pub updated_at: Timestamp,
}

/// GET /asin-to-remember?asin=XXXXXXXXXX
///
/// Linked from the product page userscript. Records the ASIN, or refreshes
/// its timestamp if it is already known.
pub async fn remember_asin(
    admin: AdminUser,
    State(state): State<AppState>,
    Query(params): Query<RememberAsinParams>,
) -> AppResult<impl IntoResponse> {
    let raw = params
        .asin
        .ok_or_else(|| CoreError::Validation("asin is required".into()))?;
    let asin = normalize_code(&raw)?;

    let row = RememberedAsinRepo::upsert(&state.pool, &asin).await?;

    tracing::info!(asin = %row.asin, admin = %admin.username, "ASIN remembered");

    Ok(Json(DataResponse {
        data: RememberedAsinResponse {
            asin: row.asin,
            updated_at: row.updated_at,
        },
    }))
}
