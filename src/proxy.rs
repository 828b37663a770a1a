//! Transparent forwarding to the backend API.
//!
//! The proxy relays the backend's status code and body bytes unchanged;
//! the only thing it adds is the session gate in front and a uniform 500
//! shape when the backend cannot be reached.

use anyhow::{anyhow, Result};
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::config::Settings;
use crate::server::AppState;
use crate::session;

/// Fixed headers attached to every forwarded request.
const FORWARD_USER_AGENT: &str = "SignalDash/1.0";
const NGROK_SKIP_HEADER: &str = "ngrok-skip-browser-warning";

/// One backend round trip, ready to relay.
pub struct BackendResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Send `method <backend>/api/<path>[?query]` and collect the response.
///
/// Bodies are forwarded for every method that carries one, not just POST.
/// Transport failures (refused, DNS, timeout) surface as `Err`; any HTTP
/// response from the backend, error status included, is `Ok`.
pub async fn forward(
    http: &reqwest::Client,
    settings: &Settings,
    method: Method,
    path: &str,
    query: Option<&str>,
    content_type: Option<&str>,
    body: Bytes,
) -> Result<BackendResponse> {
    let url = match query {
        Some(q) if !q.is_empty() => format!("{}/api/{}?{}", settings.backend_api_url, path, q),
        _ => format!("{}/api/{}", settings.backend_api_url, path),
    };

    let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| anyhow!("invalid method: {e}"))?;

    let mut req = http
        .request(method, &url)
        .header(NGROK_SKIP_HEADER, "true")
        .header(reqwest::header::USER_AGENT, FORWARD_USER_AGENT);

    if !body.is_empty() {
        req = req
            .header(
                reqwest::header::CONTENT_TYPE,
                content_type.unwrap_or("application/json"),
            )
            .body(body.to_vec());
    }

    let resp = req.send().await?;
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = resp.bytes().await?;

    Ok(BackendResponse {
        status,
        content_type,
        body: Bytes::from(bytes.to_vec()),
    })
}

/// The uniform failure shape for an unreachable or broken backend.
pub fn backend_failure(details: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Backend connection failed",
            "details": details,
        })),
    )
        .into_response()
}

/// `ANY /api/proxy/{*path}`: the authenticated tunnel.
pub async fn handle(
    State(st): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !session::is_authenticated(session::cookie_header(&headers)) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Not authenticated"})),
        )
            .into_response();
    }

    let id = Uuid::new_v4();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    log::info!("proxy.forward id={id} method={method} path={path}");

    match forward(
        &st.http,
        &st.settings,
        method,
        &path,
        query.as_deref(),
        content_type,
        body,
    )
    .await
    {
        Ok(backend) => {
            log::info!("proxy.relay id={id} status={}", backend.status.as_u16());
            let mut resp = (backend.status, backend.body).into_response();
            if let Some(ct) = backend.content_type {
                if let Ok(value) = ct.parse() {
                    resp.headers_mut().insert(header::CONTENT_TYPE, value);
                }
            }
            resp
        }
        Err(e) => {
            log::error!("proxy.backend.error id={id} {e}");
            backend_failure(e.to_string())
        }
    }
}
