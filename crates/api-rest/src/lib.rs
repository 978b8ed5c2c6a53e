//! # API REST
//!
//! REST API for Heridas.
//!
//! Handles:
//! - HTTP endpoints with axum (`POST /api/analyze`, `GET /health`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelope, status codes, CORS, body limit)
//!
//! Uses `api-shared` for wire types and `heridas-core` for the analysis itself.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use api_shared::{AnalyzeReq, AnalyzeRes, ErrorRes, HealthRes, HealthService, PatientData};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use heridas_core::{AnalysisError, AnalysisService, CoreConfig};
use heridas_gateway::ClassificationGateway;
use heridas_log_sink::log_sink_from_config;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Prefix of the message returned when the request body cannot be read.
const INTERNAL_ERROR_PREFIX: &str = "Error Interno";
/// Prefix of the message returned when the classification provider fails.
const CLASSIFICATION_ERROR_PREFIX: &str = "Error en la IA";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analysis: AnalysisService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze),
    components(schemas(HealthRes, AnalyzeReq, PatientData, AnalyzeRes, ErrorRes))
)]
struct ApiDoc;

/// Wires the gateway and the log sink described by `config` into an [`AppState`].
///
/// # Errors
/// Returns an error if an HTTP client cannot be constructed.
pub fn build_state(config: &CoreConfig) -> anyhow::Result<AppState> {
    let gateway = ClassificationGateway::from_config(config.gateway())?;
    let log_sink = log_sink_from_config(config.log())?;

    tracing::info!(
        gemini = config.gateway().gemini.api_key().is_some(),
        openai = config.gateway().openai.api_key().is_some(),
        vocabulary_policy = ?config.gateway().vocabulary_policy,
        log = config.log().is_configured(),
        image_archive = config.log().archive_enabled(),
        "analysis backends"
    );

    Ok(AppState {
        analysis: AnalysisService::new(Arc::new(gateway), log_sink),
    })
}

/// Log filter shared by the launchers: `RUST_LOG` plus `info` for every Heridas crate.
///
/// # Errors
/// Returns an error if a built-in directive fails to parse.
pub fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("heridas=info".parse()?)
        .add_directive("api_rest=info".parse()?))
}

/// Builds the REST router.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `config.rest_addr()` and serves the API until the process stops.
///
/// # Errors
/// Returns an error if the state cannot be built, the address cannot be bound, or the
/// server fails while running.
pub async fn serve(config: &CoreConfig) -> anyhow::Result<()> {
    let state = build_state(config)?;
    let app = router(state, config.max_body_bytes());

    let addr = config.rest_addr();
    tracing::info!("++ Starting Heridas REST on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness check for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Wound classification and log status", body = AnalyzeRes),
        (status = 400, description = "Missing or invalid image", body = ErrorRes),
        (status = 413, description = "Body exceeds the configured limit", body = ErrorRes),
        (status = 500, description = "Unreadable body or provider failure", body = ErrorRes)
    )
)]
/// Classify a wound photograph
///
/// Builds the instruction from the patient context, asks the selected provider for a
/// classification and appends the result to the analysis log when it is configured.
///
/// # Errors
/// - `400 Bad Request` if the image is missing or is not a base64 image data URI.
/// - `500 Internal Server Error` if the body is not valid JSON or the provider fails.
///
/// The body is read as JSON whatever its `Content-Type`.
///
/// Log failures never fail the request; they are reported in `sheetStatus`.
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalyzeRes>, (StatusCode, Json<ErrorRes>)> {
    let body = body.map_err(|rejection| {
        tracing::error!("Unreadable analyze request: {}", rejection.body_text());
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, internal_error(rejection.body_text()))
    })?;
    let req: AnalyzeReq = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Invalid analyze request JSON: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, internal_error(e))
    })?;

    match state.analysis.analyse(req.into()).await {
        Ok(response) => Ok(Json(response.into())),
        Err(AnalysisError::Validation(message)) => {
            tracing::warn!("Rejected analyze request: {}", message);
            Err((StatusCode::BAD_REQUEST, Json(ErrorRes::new(message))))
        }
        Err(AnalysisError::Classification(e)) => {
            tracing::error!("Classification error: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes::new(format!("{CLASSIFICATION_ERROR_PREFIX}: {e}"))),
            ))
        }
    }
}

fn internal_error(reason: impl std::fmt::Display) -> Json<ErrorRes> {
    Json(ErrorRes::new(format!("{INTERNAL_ERROR_PREFIX}: {reason}")))
}
