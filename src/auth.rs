use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::server::AppState;
use crate::session;

/// Auth responses must never be served from a cache.
const NO_STORE: &str = "no-cache, no-store, must-revalidate";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// `POST /api/auth`: the single shared-secret gate. No rate limiting, no
/// lockout; the secret comes from `DASHBOARD_PASSWORD`.
pub async fn login(State(st): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    let timestamp = Utc::now().to_rfc3339();

    if constant_time_eq(
        req.password.as_bytes(),
        st.settings.dashboard_password.as_bytes(),
    ) {
        log::info!("auth.login.ok");
        (
            StatusCode::OK,
            [
                (header::CACHE_CONTROL, NO_STORE.to_string()),
                (
                    header::SET_COOKIE,
                    session::set_cookie_header(st.settings.session_max_age_secs),
                ),
            ],
            Json(json!({
                "success": true,
                "message": "Authenticated",
                "timestamp": timestamp,
            })),
        )
            .into_response()
    } else {
        log::warn!("auth.login.rejected");
        (
            StatusCode::UNAUTHORIZED,
            [(header::CACHE_CONTROL, NO_STORE.to_string())],
            Json(json!({
                "success": false,
                "message": "Invalid password",
                "timestamp": timestamp,
            })),
        )
            .into_response()
    }
}

/// `GET /api/auth/check`: lets the page skip re-login on load. Callers
/// treat any failure to reach this as "not authenticated".
pub async fn check(headers: HeaderMap) -> Response {
    let authenticated = session::is_authenticated(session::cookie_header(&headers));
    let status = if authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (
        status,
        [(header::CACHE_CONTROL, NO_STORE)],
        Json(json!({"authenticated": authenticated})),
    )
        .into_response()
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_time_eq_basics() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"Secret"));
        assert!(!constant_time_eq(b"secret", b"secret "));
        assert!(!constant_time_eq(b"", b"secret"));
        assert!(constant_time_eq(b"", b""));
    }
}
