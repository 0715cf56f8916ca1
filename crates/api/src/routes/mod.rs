pub mod admin;
pub mod health;
pub mod ingest;

use axum::Router;

use crate::state::AppState;

/// Build the ingest route tree.
///
/// Mounted at the root so existing userscripts keep their URLs.
///
/// ```text
/// /ingest                          POST  network event batch    (x-api-key)
/// /mapcamera-search-docs           POST  catalog document batch (x-api-key)
/// /product-detail                  POST  single product detail  (x-api-key)
///
/// /asin-to-remember?asin=          GET   remember an ASIN       (HTTP Basic)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(ingest::router()).merge(admin::router())
}
