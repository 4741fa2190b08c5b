//! HTTP server for the dashboard.
//!
//! Renders the dashboard page server-side, serves per-endpoint fragments for
//! pagination, and proxies code runs to the backend's `/execute`. Every
//! request gets its own [`Dashboard`], so no state is shared between requests.

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::config::JournalConfig;
use crate::dashboard::Dashboard;
use crate::document::PAGINATION_CONTROLS;
use crate::fetcher::{ApiClient, HttpApiClient};
use crate::records::{Endpoint, ExecuteRequest};
use crate::runner::CodeRunner;

/// Shared, read-only server state.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ApiClient>,
    pub config: Arc<JournalConfig>,
}

impl AppState {
    fn dashboard(&self) -> Dashboard {
        Dashboard::new(Arc::clone(&self.client), &self.config)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FragmentParams {
    pub page: Option<u32>,
    #[serde(default)]
    pub all: bool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/fragments/{endpoint}", get(fragment))
        .route("/run", post(run))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let mut dashboard = state.dashboard();
    dashboard.refresh().await;
    Html(dashboard.to_html())
}

/// Cards for one endpoint followed by its pagination controls.
async fn fragment(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    Query(params): Query<FragmentParams>,
) -> Response {
    let endpoint: Endpoint = match endpoint.parse() {
        Ok(endpoint) => endpoint,
        Err(e) => return (StatusCode::NOT_FOUND, e).into_response(),
    };

    let mut dashboard = state.dashboard();
    if params.all {
        dashboard.fetch_all(endpoint).await;
    } else {
        dashboard
            .fetch_page(endpoint, params.page.unwrap_or(1))
            .await;
    }

    let doc = dashboard.document();
    let html = format!(
        "{}{}",
        doc.html(&endpoint.cards_id()),
        doc.html(PAGINATION_CONTROLS)
    );
    Html(html).into_response()
}

async fn run(State(state): State<AppState>, Json(request): Json<ExecuteRequest>) -> Response {
    let runner = CodeRunner::new(Arc::clone(&state.client));
    let outcome = runner.run(&request.code).await;
    Json(outcome).into_response()
}

/// Start the dashboard server and block until Ctrl-C.
pub async fn serve(config: JournalConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    let client = HttpApiClient::new(&config.api)?;
    tracing::info!(api = %config.api.base_url, "journal API client ready");

    let state = AppState {
        client: Arc::new(client),
        config: Arc::new(config),
    };
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "dashboard listening at http://{bind_addr}/");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down dashboard server");
        })
        .await?;

    Ok(())
}
