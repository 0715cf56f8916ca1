//! Repository for the `product_details` table.

use ingest_core::product_detail::ProductDetailRecord;
use sqlx::PgPool;

use crate::models::product_detail::ProductDetailRow;

/// Column list for `product_details` queries.
const COLUMNS: &str = "\
    jan, genpin_id, price, condition_code, description, unixtime, \
    date_text, time_text, created_at, updated_at";

/// Full-row upserts of product details.
pub struct ProductDetailRepo;

impl ProductDetailRepo {
    /// Insert the detail, or overwrite every non-key column of the existing one.
    pub async fn upsert(
        pool: &PgPool,
        record: &ProductDetailRecord,
    ) -> Result<ProductDetailRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_details \
                 (jan, genpin_id, price, condition_code, description, unixtime, date_text, time_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (jan, genpin_id) DO UPDATE SET \
                 price = EXCLUDED.price, \
                 condition_code = EXCLUDED.condition_code, \
                 description = EXCLUDED.description, \
                 unixtime = EXCLUDED.unixtime, \
                 date_text = EXCLUDED.date_text, \
                 time_text = EXCLUDED.time_text, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductDetailRow>(&query)
            .bind(&record.jan)
            .bind(record.genpin_id)
            .bind(record.price)
            .bind(record.condition_code.as_deref())
            .bind(record.description.as_deref())
            .bind(record.unixtime)
            .bind(record.date.as_deref())
            .bind(record.time.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a detail by its composite key.
    pub async fn find(
        pool: &PgPool,
        jan: &str,
        genpin_id: i64,
    ) -> Result<Option<ProductDetailRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM product_details WHERE jan = $1 AND genpin_id = $2");
        sqlx::query_as::<_, ProductDetailRow>(&query)
            .bind(jan)
            .bind(genpin_id)
            .fetch_optional(pool)
            .await
    }
}
