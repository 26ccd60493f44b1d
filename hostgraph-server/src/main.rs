//! HTTP server in front of the host router.
//!
//! Routes:
//! - `POST /v1/route` `{message, session_id?}` → `{session_id, responses}`
//! - `GET /v1/specialists` → discovered specialists as `{name, description}`
//! - `GET /v1/sessions/:id/history` → the session's turns
//!
//! Configure via env: `SPECIALIST_URLS` (or `RENTAL_AGENT_URL` / `WEATHER_AGENT_URL`),
//! `HTTP_TIMEOUT_SECS`, `HTTP_CONNECT_TIMEOUT_SECS`, `LISTEN`. Load .env with dotenv.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hostgraph::specialist::SpecialistSummary;
use hostgraph::{build_host_context, HistoryEntry, HostConfig, HostRouter, RunError};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};

const DEFAULT_LISTEN: &str = "0.0.0.0:8083";

/// Shared state for all routes.
struct AppState {
    router: Arc<HostRouter>,
}

#[derive(Debug, Deserialize)]
struct RouteRequest {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RouteResponse {
    session_id: String,
    responses: Vec<String>,
}

/// Load .env from current directory; if not found, try parent (workspace root when run from crate dir).
fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        return;
    }
    if let Some(env_path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| cwd.parent().map(|p| p.join(".env")))
    {
        if env_path.is_file() {
            let _ = dotenv::from_path(env_path);
        }
    }
}

/// Initializes tracing to stdout; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,hostgraph=debug,hostgraph_server=debug")
    });
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .init();
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/route", post(route_message))
        .route("/v1/specialists", get(list_specialists))
        .route("/v1/sessions/:session_id/history", get(session_history))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    info_span!("request", method = %req.method(), uri = %req.uri())
                }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    load_dotenv();
    init_tracing();

    let config = HostConfig::from_env()?;
    info!(
        specialists = ?config.specialist_urls,
        timeout_secs = config.http_timeout.as_secs(),
        "Host config loaded"
    );

    let context = build_host_context(&config).await?;
    let router = HostRouter::new(&context.collaborators, context.sessions)?;
    for s in router.specialists() {
        info!(name = %s.name, "Specialist ready");
    }

    let state = Arc::new(AppState {
        router: Arc::new(router),
    });

    let listen = std::env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string());
    info!("listening on http://{}", listen);
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

/// Routes one message. A missing `session_id` starts a new session with a fresh id.
async fn route_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ServerError> {
    if req.message.trim().is_empty() {
        return Err(ServerError::BadRequest("message must not be empty".into()));
    }
    let session_id = req
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
    tracing::debug!(session_id = %session_id, "route request");

    let responses = state
        .router
        .handle_request(&req.message, &session_id)
        .await?;
    Ok(Json(RouteResponse {
        session_id,
        responses,
    }))
}

async fn list_specialists(State(state): State<Arc<AppState>>) -> Json<Vec<SpecialistSummary>> {
    Json(state.router.specialists())
}

/// History of a session; an unknown session has an empty history.
async fn session_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<Vec<HistoryEntry>> {
    Json(state.router.history(&session_id).await)
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Run(#[from] RunError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Run(e) => {
                tracing::error!(error = %e, "policy run failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": { "message": msg } }))).into_response()
    }
}
