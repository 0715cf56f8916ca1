//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body of the log ingest response.
#[derive(Debug, Serialize)]
pub struct InsertedCount {
    pub inserted: u64,
}

/// Body of the upsert endpoints' responses.
#[derive(Debug, Serialize)]
pub struct ProcessedCount {
    pub processed: u64,
}
