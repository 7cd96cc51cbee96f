//! Router, handlers and the server loop.

use super::sessions::SessionStore;
use crate::config::FileConfig;
use crate::metrics::{MetricEvent, MetricsRegistry};
use crate::policy::PolicyUpdate;
use crate::random::SecureRandom;
use crate::session::{ActionError, GenerateRequest, Session};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Errors that can occur during server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    /// The server stopped with an error.
    #[error("server error: {0}")]
    Server(String),
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::with_port(5000)
    }
}

impl ServerSettings {
    /// Creates settings listening on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
        }
    }
}

/// Shared state for all handlers.
pub struct AppState {
    config: FileConfig,
    metrics: MetricsRegistry,
    sessions: RwLock<SessionStore>,
}

impl AppState {
    /// Creates empty server state.
    pub fn new(config: FileConfig, metrics: MetricsRegistry) -> Self {
        let sessions = SessionStore::from_config(&config.session);
        Self {
            config,
            metrics,
            sessions: RwLock::new(sessions),
        }
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// HTTP server for the password generator.
pub struct AppServer {
    settings: ServerSettings,
    state: Arc<AppState>,
}

impl AppServer {
    /// Creates a new server.
    pub fn new(settings: ServerSettings, config: FileConfig, metrics: MetricsRegistry) -> Self {
        Self {
            settings,
            state: Arc::new(AppState::new(config, metrics)),
        }
    }

    /// Returns a reference to the shared state.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Starts the HTTP server.
    ///
    /// Runs until Ctrl+C is received.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = router(self.state);
        let listener = tokio::net::TcpListener::bind(self.settings.bind_addr).await?;

        tracing::info!(
            addr = %self.settings.bind_addr,
            "Password generator listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/policy", get(get_policy_handler).post(set_policy_handler))
        .route("/generate", post(generate_handler))
        .route("/analyze", post(analyze_handler))
        .route("/pronounceable", post(pronounceable_handler))
        .route("/history", get(history_handler))
        .route("/theme", post(theme_handler))
        .route("/download", post(download_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Request-level failures rendered as JSON.
#[derive(Debug, Error)]
enum ApiError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Policy(#[from] crate::policy::PolicyError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Looks up the caller's session, creating one if needed.
async fn resolve_session(state: &AppState, headers: &HeaderMap) -> String {
    let requested = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok());

    state
        .sessions
        .write()
        .await
        .resolve(requested, Instant::now(), || Session::from_config(&state.config))
}

/// Wraps a response with the session id header.
fn with_session(id: &str, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if let Ok(value) = HeaderValue::from_str(id) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Handler for `GET /policy`.
async fn get_policy_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let id = resolve_session(&state, &headers).await;
    let sessions = state.sessions.read().await;
    match sessions.get(&id) {
        Some(session) => with_session(&id, Json(session.policy().clone())),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Handler for `POST /policy`.
async fn set_policy_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(update): Json<PolicyUpdate>,
) -> Response {
    let id = resolve_session(&state, &headers).await;
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match session.set_policy(&update) {
        Ok(policy) => {
            let policy = policy.clone();
            state.metrics.record(&MetricEvent::PolicyUpdated);
            with_session(&id, Json(policy))
        }
        Err(e) => with_session(&id, ApiError::from(e)),
    }
}

/// Handler for `POST /generate`.
async fn generate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Response {
    let id = resolve_session(&state, &headers).await;
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut rng = SecureRandom::from_os_entropy();
    match session.generate(&request, &state.config.generator, today(), &mut rng) {
        Ok(report) => {
            state.metrics.record(&MetricEvent::Generated {
                bits: report.entropy.bits,
            });
            with_session(&id, Json(report))
        }
        Err(e) => with_session(&id, ApiError::from(e)),
    }
}

/// Body of `POST /analyze` and `POST /download`.
#[derive(Debug, Deserialize)]
struct PasswordBody {
    #[serde(default)]
    password: String,
}

/// Handler for `POST /analyze`.
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<PasswordBody>,
) -> Response {
    let id = resolve_session(&state, &headers).await;
    let sessions = state.sessions.read().await;
    let Some(session) = sessions.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut rng = SecureRandom::from_os_entropy();
    match session.inspect(&body.password, &state.config.generator, &mut rng) {
        Ok(report) => {
            state.metrics.record(&MetricEvent::Analyzed {
                variations: report.variations.len(),
            });
            with_session(&id, Json(report))
        }
        Err(e) => with_session(&id, ApiError::from(e)),
    }
}

/// Body of `POST /pronounceable`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PronounceableBody {
    length: Option<usize>,
}

#[derive(Serialize)]
struct PronounceableResponse {
    password: String,
}

/// Handler for `POST /pronounceable`.
async fn pronounceable_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<PronounceableBody>,
) -> Response {
    let id = resolve_session(&state, &headers).await;
    let sessions = state.sessions.read().await;
    let Some(session) = sessions.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut rng = SecureRandom::from_os_entropy();
    match session.pronounceable(body.length, &state.config.generator, &mut rng) {
        Ok(password) => {
            state.metrics.record(&MetricEvent::Pronounceable);
            with_session(&id, Json(PronounceableResponse { password }))
        }
        Err(e) => with_session(&id, ApiError::from(e)),
    }
}

/// Handler for `GET /history`.
async fn history_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let id = resolve_session(&state, &headers).await;
    let sessions = state.sessions.read().await;
    match sessions.get(&id) {
        Some(session) => with_session(
            &id,
            Json(session.summary(state.config.session.rotation_days)),
        ),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Serialize)]
struct ThemeResponse {
    dark_mode: bool,
}

/// Handler for `POST /theme`.
async fn theme_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let id = resolve_session(&state, &headers).await;
    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(&id) {
        Some(session) => {
            let dark_mode = session.toggle_theme();
            with_session(&id, Json(ThemeResponse { dark_mode }))
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Handler for `POST /download`.
///
/// Returns the password as a plain-text attachment.
async fn download_handler(Json(body): Json<PasswordBody>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"password.txt\"",
            ),
        ],
        body.password.into_bytes(),
    )
}

/// Handler for the /metrics endpoint.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

/// Handler for the /health endpoint.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            FileConfig::default(),
            MetricsRegistry::new().unwrap(),
        ))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn session_header(response: &Response) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let id = response.headers().get(SESSION_HEADER).unwrap().clone();
        headers.insert(SESSION_HEADER, id);
        headers
    }

    #[test]
    fn test_settings_default() {
        let settings = ServerSettings::default();
        assert_eq!(settings.bind_addr.port(), 5000);
    }

    #[test]
    fn test_settings_with_port() {
        let settings = ServerSettings::with_port(8080);
        assert_eq!(settings.bind_addr.port(), 8080);
    }

    #[tokio::test]
    async fn test_new_session_created_and_reused() {
        let state = test_state();

        let first = get_policy_handler(State(Arc::clone(&state)), HeaderMap::new()).await;
        assert_eq!(first.status(), StatusCode::OK);
        let headers = session_header(&first);

        let second = get_policy_handler(State(Arc::clone(&state)), headers.clone()).await;
        assert_eq!(
            second.headers().get(SESSION_HEADER),
            headers.get(SESSION_HEADER)
        );
        assert_eq!(state.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_headerless_requests_stay_within_cap() {
        let mut config = FileConfig::default();
        config.session.max_sessions = 8;
        let state = Arc::new(AppState::new(config, MetricsRegistry::new().unwrap()));

        for _ in 0..100 {
            let response = get_policy_handler(State(Arc::clone(&state)), HeaderMap::new()).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(state.session_count().await, 8);
    }

    #[tokio::test]
    async fn test_unknown_session_replaced() {
        let state = test_state();
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("forged"));

        let response = get_policy_handler(State(Arc::clone(&state)), headers).await;
        let id = response.headers().get(SESSION_HEADER).unwrap();
        assert_ne!(id.to_str().unwrap(), "forged");
    }

    #[tokio::test]
    async fn test_generate_records_history() {
        let state = test_state();
        let request = GenerateRequest {
            length: Some(20),
            ..GenerateRequest::default()
        };

        let response =
            generate_handler(State(Arc::clone(&state)), HeaderMap::new(), Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = session_header(&response);
        assert!(body_text(response).await.contains("\"entropy\""));

        let history = history_handler(State(Arc::clone(&state)), headers).await;
        let text = body_text(history).await;
        assert!(text.contains("\"next_rotation\""));
        assert!(!text.contains("\"history\":[]"));

        let metrics = body_text(metrics_handler(State(state)).await.into_response()).await;
        assert!(metrics.contains("passgen_generated_total 1"));
    }

    #[tokio::test]
    async fn test_generate_zero_length_is_bad_request() {
        let state = test_state();
        let request = GenerateRequest {
            length: Some(0),
            ..GenerateRequest::default()
        };

        let response = generate_handler(State(state), HeaderMap::new(), Json(request)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("error"));
    }

    #[tokio::test]
    async fn test_policy_update_rejects_zero_min_length() {
        let state = test_state();
        let update = PolicyUpdate {
            min_length: Some(0),
            ..PolicyUpdate::default()
        };

        let response = set_policy_handler(State(state), HeaderMap::new(), Json(update)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_returns_variations() {
        let state = test_state();
        let body = PasswordBody {
            password: "abc".to_string(),
        };

        let response = analyze_handler(State(state), HeaderMap::new(), Json(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        assert!(text.contains("\"variations\""));
        assert!(text.contains("uppercase"));
    }

    #[tokio::test]
    async fn test_theme_toggles() {
        let state = test_state();
        let first = theme_handler(State(Arc::clone(&state)), HeaderMap::new()).await;
        let headers = session_header(&first);
        assert!(body_text(first).await.contains("true"));

        let second = theme_handler(State(state), headers).await;
        assert!(body_text(second).await.contains("false"));
    }

    #[tokio::test]
    async fn test_download_is_plain_text_attachment() {
        let body = PasswordBody {
            password: "S3cret!pass".to_string(),
        };
        let response = download_handler(Json(body)).await.into_response();

        let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
        assert_eq!(
            disposition.to_str().unwrap(),
            "attachment; filename=\"password.txt\""
        );
        assert_eq!(body_text(response).await, "S3cret!pass");
    }
}
