use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use upwait_core::core::CoreError;

pub const SEARCH_TERM_REQUIRED: &str = "Search term required";
pub const INVALID_VOTE: &str = "Valid name and vote type (up/down) required";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn search_term_required() -> Self {
        Self::InvalidInput(SEARCH_TERM_REQUIRED.to_string())
    }

    pub fn invalid_vote() -> Self {
        Self::InvalidInput(INVALID_VOTE.to_string())
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput { reason } => Self::InvalidInput(reason),
            CoreError::NotFound { .. } => Self::NotFound,
            CoreError::Store(e) => Self::Internal(format!("{e:#}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
