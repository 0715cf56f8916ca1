use ingest_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `remembered_asins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RememberedAsin {
    pub asin: String,
    /// Seeded on first insert; upserts leave it alone.
    pub counter: i32,
    /// Last time the ASIN was submitted.
    pub updated_at: Timestamp,
}
