//! Repository for the `mapcamera_search_docs` table.
//!
//! Each document is inserted if its `genpin_id` is new. Otherwise the stored
//! row is locked, its trigger fields are compared with the incoming ones via
//! [`merge_decision`], and the row is either rewritten in full or left
//! untouched. A batch runs in one transaction, in order, so repeated keys
//! within a batch see the effect of earlier documents.
//!
//! Before the first write the transaction takes a transaction-scoped advisory
//! lock on every distinct key, in ascending order. Overlapping batches then
//! queue behind each other instead of deadlocking on row locks taken in
//! batch order.

use std::collections::BTreeSet;

use ingest_core::catalog::{
    merge_decision, CatalogRecord, MergeDecision, MergeOutcome, ReconcileSummary, TriggerFields,
};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgConnection, PgPool, Postgres};

use crate::models::catalog_document::CatalogDocumentRow;

/// Non-key columns, in bind order.
const FIELD_COLUMNS: [&str; 31] = [
    "genpin_name",
    "jancode",
    "mapcode",
    "maker_name_kana",
    "salesprice",
    "specialprice",
    "selltypeid",
    "conditionid",
    "sellstatusid",
    "pricedownflag",
    "recommendflag",
    "econlyflag",
    "newstockflag",
    "limitedflag",
    "newproductflag",
    "raremodelflag",
    "beginnerflag",
    "businessflag",
    "reviewcount",
    "reviewrating",
    "point",
    "subtitle",
    "usednum",
    "usedsalespricemin",
    "usedsalespointmin",
    "accessories",
    "category_name",
    "bestbadgeflag",
    "usedconditionrank",
    "logisticstockdispkbn",
    "videoflag",
];

/// Reconciles catalog documents against stored rows.
pub struct CatalogDocumentRepo;

impl CatalogDocumentRepo {
    /// Reconcile a batch of documents, all-or-nothing.
    ///
    /// An empty batch returns an empty summary without opening a transaction.
    pub async fn reconcile(
        pool: &PgPool,
        records: &[CatalogRecord],
    ) -> Result<ReconcileSummary, sqlx::Error> {
        let mut summary = ReconcileSummary::default();
        if records.is_empty() {
            return Ok(summary);
        }

        let insert_sql = insert_sql();
        let update_sql = update_sql();

        let mut tx = pool.begin().await?;
        Self::lock_keys(&mut *tx, records).await?;
        for record in records {
            let outcome = Self::reconcile_one(&mut *tx, &insert_sql, &update_sql, record).await?;
            summary.record(outcome);
        }
        tx.commit().await?;

        tracing::debug!(
            inserted = summary.inserted,
            overwritten = summary.overwritten,
            unchanged = summary.unchanged,
            "Reconciled catalog documents",
        );
        Ok(summary)
    }

    /// Advisory-lock every distinct key of the batch, smallest first.
    /// Released at commit or rollback.
    async fn lock_keys(
        conn: &mut PgConnection,
        records: &[CatalogRecord],
    ) -> Result<(), sqlx::Error> {
        let keys: Vec<i64> = records
            .iter()
            .map(|r| r.genpin_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // unnest yields the array in order, so locks are taken ascending.
        sqlx::query("SELECT pg_advisory_xact_lock(k) FROM unnest($1::BIGINT[]) AS t(k)")
            .bind(keys)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn reconcile_one(
        conn: &mut PgConnection,
        insert_sql: &str,
        update_sql: &str,
        record: &CatalogRecord,
    ) -> Result<MergeOutcome, sqlx::Error> {
        let inserted = bind_record(sqlx::query(insert_sql), record)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        if inserted == 1 {
            return Ok(MergeOutcome::Inserted);
        }

        // The key collided. Lock the stored row so the decision and the
        // write see the same state.
        let existing = Self::lock_trigger_fields(conn, record.genpin_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        match merge_decision(&existing, &record.fields.trigger_fields()) {
            MergeDecision::Keep => Ok(MergeOutcome::Unchanged),
            MergeDecision::ApplyIncoming => {
                bind_record(sqlx::query(update_sql), record)
                    .execute(&mut *conn)
                    .await?;
                Ok(MergeOutcome::Overwritten)
            }
        }
    }

    async fn lock_trigger_fields(
        conn: &mut PgConnection,
        genpin_id: i64,
    ) -> Result<Option<TriggerFields>, sqlx::Error> {
        let row: Option<(Option<String>, Option<i64>, Option<i64>)> = sqlx::query_as(
            "SELECT jancode, salesprice, specialprice \
             FROM mapcamera_search_docs WHERE genpin_id = $1 FOR UPDATE",
        )
        .bind(genpin_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(|(jancode, salesprice, specialprice)| TriggerFields {
            jancode,
            salesprice,
            specialprice,
        }))
    }

    /// Find a stored document by its key.
    pub async fn find_by_genpin_id(
        pool: &PgPool,
        genpin_id: i64,
    ) -> Result<Option<CatalogDocumentRow>, sqlx::Error> {
        let query = format!(
            "SELECT genpin_id, {}, updatetime FROM mapcamera_search_docs WHERE genpin_id = $1",
            FIELD_COLUMNS.join(", ")
        );
        sqlx::query_as::<_, CatalogDocumentRow>(&query)
            .bind(genpin_id)
            .fetch_optional(pool)
            .await
    }
}

/// `$1` = genpin_id, `$2..$32` = fields, `$33` = updatetime.
fn insert_sql() -> String {
    let placeholders: Vec<String> = (1..=FIELD_COLUMNS.len() + 2).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO mapcamera_search_docs (genpin_id, {}, updatetime) VALUES ({}) \
         ON CONFLICT (genpin_id) DO NOTHING",
        FIELD_COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

/// Same bind layout as [`insert_sql`]; rewrites every column but the key.
fn update_sql() -> String {
    let assignments: Vec<String> = FIELD_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 2))
        .collect();
    format!(
        "UPDATE mapcamera_search_docs SET {}, updatetime = ${} WHERE genpin_id = $1",
        assignments.join(", "),
        FIELD_COLUMNS.len() + 2
    )
}

/// Bind a record in the order of [`FIELD_COLUMNS`], framed by key and timestamp.
fn bind_record<'q>(
    query: Query<'q, Postgres, PgArguments>,
    record: &'q CatalogRecord,
) -> Query<'q, Postgres, PgArguments> {
    let f = &record.fields;
    query
        .bind(record.genpin_id)
        .bind(f.genpin_name.as_deref())
        .bind(f.jancode.as_deref())
        .bind(f.mapcode.as_deref())
        .bind(f.maker_name_kana.as_deref())
        .bind(f.salesprice)
        .bind(f.specialprice)
        .bind(f.selltypeid)
        .bind(f.conditionid)
        .bind(f.sellstatusid)
        .bind(f.pricedownflag)
        .bind(f.recommendflag)
        .bind(f.econlyflag)
        .bind(f.newstockflag)
        .bind(f.limitedflag)
        .bind(f.newproductflag)
        .bind(f.raremodelflag)
        .bind(f.beginnerflag)
        .bind(f.businessflag)
        .bind(f.reviewcount)
        .bind(f.reviewrating)
        .bind(f.point)
        .bind(f.subtitle.as_deref())
        .bind(f.usednum)
        .bind(f.usedsalespricemin)
        .bind(f.usedsalespointmin)
        .bind(f.accessories.as_deref())
        .bind(f.category_name.as_deref())
        .bind(f.bestbadgeflag.as_deref())
        .bind(f.usedconditionrank.as_deref())
        .bind(f.logisticstockdispkbn)
        .bind(f.videoflag)
        .bind(record.updatetime)
}
