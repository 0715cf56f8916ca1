use axum::routing::get;
use axum::Router;

use crate::handlers::remembered_asin;
use crate::state::AppState;

/// Admin routes, guarded per handler by the [`AdminUser`](crate::middleware::basic_auth::AdminUser) extractor.
pub fn router() -> Router<AppState> {
    Router::new().route("/asin-to-remember", get(remembered_asin::remember_asin))
}
