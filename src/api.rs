// 🌐 Local browser front end: one session, one user, loopback by default (axum)
//
// Routes (nested under /api by `router`):
//   GET    /health    - health check
//   GET    /session   - inputs, current result, entries, sums
//   PUT    /inputs    - input-change events for total and/or rate
//   POST   /entries   - append the current result
//   DELETE /entries   - clear all entries
//   GET    /compute   - stateless calculation (?total=..&rate=..)

use crate::calculator::{compute_reverse, Entry};
use crate::session::{coerce_input, AppendOutcome, Session, SessionView};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        AppState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        // Every session update is a single call, so a poisoned lock is still consistent
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// A form value: either a JSON number or the raw text of an input field
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub fn value(&self) -> f64 {
        match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(text) => coerce_input(text),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputsRequest {
    pub total: Option<RawNumber>,
    pub rate: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
pub struct ComputeQuery {
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub rate: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppendResponse {
    pub outcome: AppendOutcome,
    pub session: SessionView,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/session - Current session view
async fn get_session(State(state): State<AppState>) -> Json<ApiResponse<SessionView>> {
    Json(ApiResponse::ok(state.session().view()))
}

/// PUT /api/inputs - Update total and/or rate
async fn put_inputs(
    State(state): State<AppState>,
    Json(request): Json<InputsRequest>,
) -> Json<ApiResponse<SessionView>> {
    let mut session = state.session();

    if let Some(total) = &request.total {
        session.set_total(total.value());
    }
    if let Some(rate) = &request.rate {
        session.set_rate(rate.value());
    }

    Json(ApiResponse::ok(session.view()))
}

/// POST /api/entries - Append the current result
async fn append_entry(State(state): State<AppState>) -> Json<ApiResponse<AppendResponse>> {
    let mut session = state.session();
    let outcome = session.append();

    if let AppendOutcome::Appended(entry) = outcome {
        info!(base = entry.base, amount = entry.amount, "entry appended");
    }

    Json(ApiResponse::ok(AppendResponse {
        outcome,
        session: session.view(),
    }))
}

/// DELETE /api/entries - Clear all entries
async fn clear_entries(State(state): State<AppState>) -> Json<ApiResponse<SessionView>> {
    let mut session = state.session();
    session.clear();
    info!("entries cleared");

    Json(ApiResponse::ok(session.view()))
}

/// GET /api/compute - Stateless calculation
async fn compute(Query(query): Query<ComputeQuery>) -> Json<ApiResponse<Option<Entry>>> {
    let entry = compute_reverse(coerce_input(&query.total), coerce_input(&query.rate));
    Json(ApiResponse::ok(entry))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

/// API routes, without the HTML page
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/session", get(get_session))
        .route("/inputs", axum::routing::put(put_inputs))
        .route("/entries", axum::routing::post(append_entry).delete(clear_entries))
        .route("/compute", get(compute))
        .with_state(state)
}

/// Full application: page at `/`, API under `/api`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
