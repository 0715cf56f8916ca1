use ingest_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `product_details` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductDetailRow {
    pub jan: String,
    pub genpin_id: i64,
    pub price: Option<i64>,
    pub condition_code: Option<String>,
    pub description: Option<String>,
    pub unixtime: Option<i64>,
    #[sqlx(rename = "date_text")]
    pub date: Option<String>,
    #[sqlx(rename = "time_text")]
    pub time: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
