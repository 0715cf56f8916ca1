//! Repository for the append-only `itemsearch_logs` table.

use ingest_core::log_event::LogRecord;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::log_event::ItemsearchLog;

/// Column list for `itemsearch_logs` queries.
const COLUMNS: &str = "\
    id, client_ts_ms, session_id, trace_id, page_url, context, method, url, status, \
    content_type, request_body_json, response_body_json, request_body_text, \
    response_body_text, created_at";

/// Rows per multi-row INSERT. 13 binds each keeps us well under the
/// 65535 bind-parameter limit.
const ROWS_PER_STATEMENT: usize = 1000;

/// Appends client network events.
pub struct LogEventRepo;

impl LogEventRepo {
    /// Insert every record in order, all-or-nothing.
    ///
    /// Records are written as multi-row statements inside one transaction, so
    /// a failure leaves no row of the batch behind. Returns the number of rows
    /// inserted.
    pub async fn insert_batch(pool: &PgPool, records: &[LogRecord]) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for chunk in records.chunks(ROWS_PER_STATEMENT) {
            let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
                "INSERT INTO itemsearch_logs \
                 (client_ts_ms, session_id, trace_id, page_url, context, method, url, status, \
                  content_type, request_body_json, response_body_json, request_body_text, \
                  response_body_text) ",
            );
            qb.push_values(chunk, |mut b, r| {
                b.push_bind(r.client_ts_ms)
                    .push_bind(r.session_id.as_deref())
                    .push_bind(r.trace_id.as_deref())
                    .push_bind(r.page_url.as_deref())
                    .push_bind(r.context.as_deref())
                    .push_bind(r.method.as_deref())
                    .push_bind(r.url.as_deref())
                    .push_bind(r.status)
                    .push_bind(r.content_type.as_deref())
                    .push_bind(r.request_body.json.as_deref())
                    .push_unseparated("::jsonb")
                    .push_bind(r.response_body.json.as_deref())
                    .push_unseparated("::jsonb")
                    .push_bind(r.request_body.text.as_deref())
                    .push_bind(r.response_body.text.as_deref());
            });
            inserted += qb.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(inserted, "Appended itemsearch log rows");
        Ok(inserted)
    }

    /// All rows carrying the given trace id, oldest first.
    pub async fn list_by_trace_id(
        pool: &PgPool,
        trace_id: &str,
    ) -> Result<Vec<ItemsearchLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM itemsearch_logs WHERE trace_id = $1 ORDER BY id");
        sqlx::query_as::<_, ItemsearchLog>(&query)
            .bind(trace_id)
            .fetch_all(pool)
            .await
    }
}
