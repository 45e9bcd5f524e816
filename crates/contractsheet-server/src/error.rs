use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contractsheet::ContractError;
use serde_json::json;

/// Maps generation failures onto HTTP statuses with a `{"error": ..}` body.
#[derive(Debug)]
pub struct ApiError(pub ContractError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ContractError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ContractError::TemplateNotFound { .. } => StatusCode::NOT_FOUND,
            ContractError::Generation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ContractError> for ApiError {
    fn from(err: ContractError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "contract request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "contract request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
