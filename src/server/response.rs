use crate::error::RecipeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

impl RecipeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecipeError::Validation(_) => StatusCode::BAD_REQUEST,
            RecipeError::NotFound(_) => StatusCode::NOT_FOUND,
            RecipeError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RecipeError::Storage(_) | RecipeError::Config(_) | RecipeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// `{"error": "..."}` with the given status.
pub(super) fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub(super) fn message_body(message: &str) -> Response {
    (StatusCode::OK, Json(json!({ "message": message }))).into_response()
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        error_body(status, self.to_string())
    }
}
