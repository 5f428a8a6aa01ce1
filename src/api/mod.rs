use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::{
    Analysis, Calibration, EngineError, ScenarioKey, ScenarioRow, run_analysis, scenario_table,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AnalysisPayload {
    scenario: Option<String>,
    seed: Option<u64>,
}

#[derive(Debug)]
struct ApiRequest {
    scenario: ScenarioKey,
    seed: u64,
}

#[derive(Debug, Serialize)]
struct ScenariosResponse<'a> {
    scenarios: &'a [ScenarioRow],
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type SharedCalibration = Arc<Calibration>;

pub fn router(calibration: Calibration) -> Router {
    Router::new()
        .route(
            "/api/analysis",
            get(analysis_get_handler).post(analysis_post_handler),
        )
        .route("/api/scenarios", get(scenarios_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .with_state(Arc::new(calibration))
}

pub async fn run_http_server(port: u16, calibration: Calibration) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(calibration);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "outlook HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/analysis?scenario=base");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn scenarios_handler(State(calibration): State<SharedCalibration>) -> Response {
    json_response(
        StatusCode::OK,
        ScenariosResponse {
            scenarios: scenario_table(&calibration),
        },
    )
}

async fn analysis_get_handler(
    State(calibration): State<SharedCalibration>,
    payload: Result<Query<AnalysisPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => analysis_handler_impl(&calibration, payload),
        Err(rejection) => malformed_request_response(&rejection.body_text()),
    }
}

async fn analysis_post_handler(
    State(calibration): State<SharedCalibration>,
    payload: Result<Json<AnalysisPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => analysis_handler_impl(&calibration, payload),
        Err(rejection) => malformed_request_response(&rejection.body_text()),
    }
}

fn malformed_request_response(detail: &str) -> Response {
    tracing::warn!(detail, "malformed analysis request");
    error_response(StatusCode::BAD_REQUEST, detail)
}

fn analysis_handler_impl(calibration: &Calibration, payload: AnalysisPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => return engine_error_response(&err),
    };

    tracing::info!(scenario = %request.scenario, seed = request.seed, "analysis requested");
    match run_analysis(request.scenario, calibration, request.seed) {
        Ok(analysis) => json_response(StatusCode::OK, analysis),
        Err(err) => engine_error_response(&err),
    }
}

/// Missing scenario means `all`; missing seed means a fresh random draw.
fn api_request_from_payload(payload: AnalysisPayload) -> Result<ApiRequest, EngineError> {
    let scenario = match payload.scenario.as_deref() {
        Some(raw) => raw.parse()?,
        None => ScenarioKey::All,
    };
    let seed = payload.seed.unwrap_or_else(rand::random);
    Ok(ApiRequest { scenario, seed })
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<AnalysisPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload).map_err(|e| e.to_string())
}

fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnknownScenario(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn engine_error_response(err: &EngineError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "analysis failed");
    } else {
        tracing::warn!(error = %err, "rejected analysis request");
    }
    error_response(status, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

/// Serializes an analysis exactly as the HTTP API does.
pub fn analysis_to_json(analysis: &Analysis, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(analysis)
    } else {
        serde_json::to_string(analysis)
    }
}
