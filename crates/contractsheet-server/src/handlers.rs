use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Local;
use contractsheet::{ContractError, TemplateInfo, XLSX_CONTENT_TYPE};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

const SERVICE: &str = "contractsheet";

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Local::now().to_rfc3339(),
        "endpoints": {
            "health": "GET /health",
            "generate": "POST /api/generate-contract",
            "template_info": "GET /api/template-info",
        },
    }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
        "message": "contract generator is running",
    }))
}

/// GET /api/generate-contract
pub async fn generate_probe() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "POST contract JSON to this endpoint to receive an xlsx file",
    }))
}

/// POST /api/generate-contract
///
/// Workbook work is synchronous, so it runs on the blocking pool.
pub async fn generate_contract(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let assembler = state.assembler.clone();
    let generated = tokio::task::spawn_blocking(move || assembler.generate_from_slice(&body))
        .await
        .map_err(|e| ContractError::generation(format!("generation task failed: {e}")))??;

    let disposition = HeaderValue::from_str(&generated.content_disposition())
        .map_err(ContractError::generation)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        generated.bytes,
    )
        .into_response())
}

/// GET /api/template-info
pub async fn template_info(State(state): State<AppState>) -> Result<Json<TemplateInfo>, ApiError> {
    let assembler = state.assembler.clone();
    let info = tokio::task::spawn_blocking(move || assembler.template_info())
        .await
        .map_err(|e| ContractError::generation(format!("template inspection failed: {e}")))??;
    Ok(Json(info))
}
