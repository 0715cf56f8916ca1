//! HTTP-level tests for the log and catalog ingest endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use ingest_db::repositories::{CatalogDocumentRepo, LogEventRepo};
use serde_json::json;
use sqlx::PgPool;

async fn count(pool: &PgPool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// POST /ingest
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ingest_logs_returns_inserted_count(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/ingest",
        json!({"items": [
            {
                "client_ts_ms": 1735689600000_i64,
                "trace_id": "t-http",
                "context": "xhr",
                "method": "GET",
                "url": "https://www.mapcamera.com/ec/api/itemsearch?q=leica",
                "status": 200,
                "content_type": "application/json",
                "request_body": null,
                "response_body": "{\"items\": [1, 2]}"
            },
            {
                "trace_id": "t-http",
                "response_body": {"already": "parsed"}
            }
        ]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["inserted"], 2);

    let rows = LogEventRepo::list_by_trace_id(&pool, "t-http").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].response_body_json, Some(json!({"items": [1, 2]})));
    assert_eq!(rows[0].request_body_json, None);
    assert_eq!(rows[0].request_body_text, None);
    assert_eq!(rows[1].response_body_json, Some(json!({"already": "parsed"})));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ingest_empty_batch_inserts_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/ingest", json!({"items": []})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["inserted"], 0);
    assert_eq!(count(&pool, "itemsearch_logs").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ingest_rejects_whole_batch_on_one_bad_event(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/ingest",
        json!({"items": [
            {"trace_id": "ok"},
            {"context": "a-context-tag-well-over-sixteen-chars"}
        ]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().starts_with("items[1]: "));
    assert_eq!(count(&pool, "itemsearch_logs").await, 0);
}

// ---------------------------------------------------------------------------
// POST /mapcamera-search-docs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_docs_first_submission_inserts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/mapcamera-search-docs",
        json!({
            "docs": [
                {"genpin_id": 1, "jancode": "A", "salesprice": 100, "genpin_name": "Lens"},
                {"genpin_id": 2, "jancode": "B", "salesprice": 200, "unknown_attr": "ignored"}
            ],
            "client_ts_ms": 1000,
            "page_url": "https://www.mapcamera.com/search?q=lens",
            "context": "search"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["processed"], 2);

    let row = CatalogDocumentRepo::find_by_genpin_id(&pool, 1).await.unwrap().unwrap();
    assert_eq!(row.genpin_name.as_deref(), Some("Lens"));
    assert_eq!(row.updatetime, 1000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_docs_unchanged_triggers_are_a_no_op(pool: PgPool) {
    let first = json!({
        "docs": [{"genpin_id": 1, "jancode": "A", "salesprice": 100, "subtitle": "old"}],
        "client_ts_ms": 1000
    });
    let second = json!({
        "docs": [{"genpin_id": 1, "jancode": "A", "salesprice": 100, "subtitle": "new"}],
        "client_ts_ms": 2000
    });

    post_json(common::build_test_app(pool.clone()), "/mapcamera-search-docs", first).await;
    let response = post_json(common::build_test_app(pool.clone()), "/mapcamera-search-docs", second).await;

    // Unchanged documents still count as processed.
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["processed"], 1);

    let row = CatalogDocumentRepo::find_by_genpin_id(&pool, 1).await.unwrap().unwrap();
    assert_eq!(row.subtitle.as_deref(), Some("old"));
    assert_eq!(row.updatetime, 1000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_docs_price_change_overwrites(pool: PgPool) {
    let first = json!({
        "docs": [{"genpin_id": 1, "jancode": "A", "salesprice": 100, "subtitle": "old", "point": 10}],
        "client_ts_ms": 1000
    });
    let second = json!({
        "docs": [{"genpin_id": 1, "jancode": "A", "salesprice": 90, "subtitle": "new"}],
        "client_ts_ms": 2000
    });

    post_json(common::build_test_app(pool.clone()), "/mapcamera-search-docs", first).await;
    let response = post_json(common::build_test_app(pool.clone()), "/mapcamera-search-docs", second).await;
    assert_eq!(response.status(), StatusCode::OK);

    let row = CatalogDocumentRepo::find_by_genpin_id(&pool, 1).await.unwrap().unwrap();
    assert_eq!(row.salesprice, Some(90));
    assert_eq!(row.subtitle.as_deref(), Some("new"));
    assert_eq!(row.point, None);
    assert_eq!(row.updatetime, 2000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_docs_without_client_timestamp_use_server_time(pool: PgPool) {
    let before = chrono::Utc::now().timestamp_millis();
    let app = common::build_test_app(pool.clone());
    post_json(app, "/mapcamera-search-docs", json!({"docs": [{"genpin_id": 7}]})).await;
    let after = chrono::Utc::now().timestamp_millis();

    let row = CatalogDocumentRepo::find_by_genpin_id(&pool, 7).await.unwrap().unwrap();
    assert!(row.updatetime >= before && row.updatetime <= after);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_docs_empty_batch_processes_zero(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/mapcamera-search-docs", json!({"docs": []})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["processed"], 0);
    assert_eq!(count(&pool, "mapcamera_search_docs").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_docs_missing_key_rejects_whole_batch(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/mapcamera-search-docs",
        json!({"docs": [{"genpin_id": 1}, {"jancode": "no-key"}]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "docs[1].genpin_id is required");
    assert_eq!(count(&pool, "mapcamera_search_docs").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_docs_overlong_context_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/mapcamera-search-docs",
        json!({"docs": [{"genpin_id": 1}], "context": "seventeen-chars!!"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
