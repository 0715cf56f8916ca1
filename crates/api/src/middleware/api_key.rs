//! Shared-secret extractor for the ingest endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ingest_core::credentials::api_key_matches;
use ingest_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the configured API key.
///
/// Put it first in a handler's parameter list so unauthenticated requests
/// are rejected before the body is parsed:
///
/// ```ignore
/// async fn ingest(_key: ApiKey, Json(batch): Json<LogBatch>) -> AppResult<()> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        if !api_key_matches(provided, &state.config.api_key) {
            tracing::warn!(has_key = provided.is_some(), "Rejected request with bad API key");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or missing API key".into(),
            )));
        }
        Ok(ApiKey)
    }
}
