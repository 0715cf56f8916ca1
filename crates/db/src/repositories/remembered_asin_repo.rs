//! Repository for the `remembered_asins` table.

use ingest_core::remembered_asin::INITIAL_COUNTER;
use sqlx::PgPool;

use crate::models::remembered_asin::RememberedAsin;

/// Upserts of ASINs flagged for later review.
pub struct RememberedAsinRepo;

impl RememberedAsinRepo {
    /// Remember an ASIN.
    ///
    /// First sight seeds the counter; later calls keep it and only refresh
    /// `updated_at`. `clock_timestamp()` rather than `NOW()` so two upserts in
    /// one transaction still get distinct timestamps.
    pub async fn upsert(pool: &PgPool, asin: &str) -> Result<RememberedAsin, sqlx::Error> {
        sqlx::query_as::<_, RememberedAsin>(
            "INSERT INTO remembered_asins (asin, counter, updated_at) \
             VALUES ($1, $2, clock_timestamp()) \
             ON CONFLICT (asin) DO UPDATE SET \
                 counter = remembered_asins.counter, \
                 updated_at = clock_timestamp() \
             RETURNING asin, counter, updated_at",
        )
        .bind(asin)
        .bind(INITIAL_COUNTER)
        .fetch_one(pool)
        .await
    }
}
