use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::config::Settings;
use crate::session;
use crate::types::DataPayload;
use crate::view::{self, SignalFilter, SortKey, ViewState};
use crate::{auth, proxy, ui};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        // Single shared outbound client; the explicit timeout bounds every
        // backend call.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.proxy_timeout_secs))
            .build()?;
        Ok(Self { settings, http })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/auth", post(auth::login))
        .route("/api/auth/check", get(auth::check))
        .route("/api/view", get(api_view))
        .route("/api/proxy/{*path}", any(proxy::handle))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(settings: Settings) -> Result<()> {
    let state = AppState::new(settings.clone())?;
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("server.start url=http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log::info!("server.shutdown signal=ctrl_c");
    }
}

async fn index(State(st): State<AppState>) -> Html<String> {
    Html(ui::render_index_html(st.settings.poll_interval_secs))
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    filter: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
}

/// `GET /api/view`: one page of the snapshot, shaped for the table.
///
/// Fetches `/api/data` through the same forwarding path as the proxy, so
/// the session gate and failure shape are identical; the only addition is
/// the pure filter/sort/paginate pass.
async fn api_view(
    State(st): State<AppState>,
    Query(q): Query<ViewQuery>,
    headers: HeaderMap,
) -> Response {
    if !session::is_authenticated(session::cookie_header(&headers)) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Not authenticated"})),
        )
            .into_response();
    }

    let backend = match proxy::forward(
        &st.http,
        &st.settings,
        Method::GET,
        "data",
        None,
        None,
        Bytes::new(),
    )
    .await
    {
        Ok(resp) => resp,
        Err(e) => {
            log::error!("view.backend.error {e}");
            return proxy::backend_failure(e.to_string());
        }
    };

    if !backend.status.is_success() {
        log::error!("view.backend.error status={}", backend.status.as_u16());
        return proxy::backend_failure(format!("backend returned {}", backend.status));
    }

    let payload: DataPayload = match serde_json::from_slice(&backend.body) {
        Ok(p) => p,
        Err(e) => {
            log::error!("view.backend.error invalid payload: {e}");
            return proxy::backend_failure(format!("invalid snapshot payload: {e}"));
        }
    };

    let state = ViewState {
        filter: q.filter.as_deref().map(SignalFilter::parse).unwrap_or_default(),
        sort: q.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
        page: q.page.unwrap_or(1),
    };

    Json(view::apply(&payload.data, state, st.settings.page_size)).into_response()
}
