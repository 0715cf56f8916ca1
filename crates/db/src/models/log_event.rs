//! Rows of the append-only `itemsearch_logs` table.

use ingest_core::types::{EpochMillis, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A stored client network event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemsearchLog {
    pub id: i64,
    pub client_ts_ms: Option<EpochMillis>,
    pub session_id: Option<String>,
    pub trace_id: Option<String>,
    pub page_url: Option<String>,
    pub context: Option<String>,
    pub method: Option<String>,
    pub url: Option<String>,
    pub status: Option<i32>,
    pub content_type: Option<String>,
    pub request_body_json: Option<serde_json::Value>,
    pub response_body_json: Option<serde_json::Value>,
    pub request_body_text: Option<String>,
    pub response_body_text: Option<String>,
    pub created_at: Timestamp,
}
