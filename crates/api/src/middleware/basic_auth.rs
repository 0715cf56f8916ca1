//! HTTP Basic extractor for the admin endpoints.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ingest_core::credentials::parse_basic_auth;
use serde_json::json;

use crate::state::AppState;

/// Realm advertised in the `WWW-Authenticate` challenge.
const REALM: &str = "ingest-admin";

/// An admin authenticated with HTTP Basic credentials.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub username: String,
}

/// 401 with a Basic challenge so browsers prompt for credentials.
#[derive(Debug)]
pub struct BasicAuthChallenge;

impl IntoResponse for BasicAuthChallenge {
    fn into_response(self) -> Response {
        let body = json!({
            "error": "Admin credentials required",
            "code": "UNAUTHORIZED",
        });
        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, format!("Basic realm=\"{REALM}\""))],
            Json(body),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = BasicAuthChallenge;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let creds = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_basic_auth)
            .ok_or(BasicAuthChallenge)?;

        let admin = &state.config.admin;
        if !creds.matches(&admin.username, &admin.password) {
            tracing::warn!(username = %creds.username, "Rejected admin credentials");
            return Err(BasicAuthChallenge);
        }

        Ok(AdminUser {
            username: creds.username,
        })
    }
}
