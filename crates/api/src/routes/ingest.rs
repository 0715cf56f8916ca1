//! Routes fed by the browser userscripts.

use axum::routing::post;
use axum::Router;

use crate::handlers::{catalog, logs, product_detail};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(logs::ingest_logs))
        .route("/mapcamera-search-docs", post(catalog::ingest_docs))
        .route("/product-detail", post(product_detail::upsert_product_detail))
}
