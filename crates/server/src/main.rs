//! HTTP boundary for the analysis pipeline.
//!
//! One route: `GET /analyze?url=<cms-document-url>` returns the JSON
//! analysis result, or `{error, details}` with an error status. Each
//! request is an independent pipeline run over shared read-only state.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use seoscope_core::{AnalysisResult, Analyzer, OpenAiOracle, OracleConfig, SeoscopeError};

#[derive(Clone)]
struct AppState {
    analyzer: Arc<Analyzer>,
}

#[derive(Deserialize)]
struct AnalyzeParams {
    url: String,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &str, details: Option<String>) -> Self {
        Self { status, body: ErrorBody { error: error.to_string(), details } }
    }
}

impl From<SeoscopeError> for ApiError {
    fn from(err: SeoscopeError) -> Self {
        let status = match &err {
            SeoscopeError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            SeoscopeError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        };
        ApiError::new(status, "failed to analyze document", Some(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<AnalysisResult>, ApiError> {
    tracing::info!(url = %params.url, "analyzing document");
    let result = state.analyzer.analyze_url(&params.url).await?;
    Ok(Json(result))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

fn build_analyzer() -> Analyzer {
    let mut analyzer = Analyzer::new();
    match OracleConfig::from_env() {
        Some(config) => match OpenAiOracle::new(config) {
            Ok(oracle) => {
                analyzer = analyzer.with_oracle(Arc::new(oracle));
            }
            Err(e) => {
                tracing::warn!(error = %e, "oracle client unavailable, serving degraded");
            }
        },
        None => {
            tracing::warn!("no OPENAI_API_KEY set, serving without oracle enrichment");
        }
    }
    analyzer
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", get(analyze))
        .route("/healthz", get(healthz))
        .layer(TimeoutLayer::new(Duration::from_secs(60)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = AppState { analyzer: Arc::new(build_analyzer()) };
    let app = router(state);

    let port = std::env::var("SEOSCOPE_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080u16);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "seoscope-server listening");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "failed to bind listener");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
