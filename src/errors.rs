// src/errors.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::models::matches::MatchStatus;

/// Error taxonomy for the match mutation surface.
///
/// Every rejected mutation maps to exactly one of these; nothing is
/// downgraded to a warning. The JSON body keeps the
/// `{"success": false, "error": ...}` envelope with a stable `kind`
/// discriminator so the UI and CLI can surface the reason verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("cannot transition match from '{from}' to '{to}'")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidTransition { .. } => "invalid_transition",
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::PermissionDenied(_) => "permission_denied",
            ApiError::Conflict(_) => "conflict",
            ApiError::Database(_) => "internal_error",
        }
    }

    /// Postgres serialization failures surface as retryable conflicts.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("40001")
            }
            _ => false,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database(e) = self {
            tracing::error!("Database error: {}", e);
        }
        let message = match self {
            // Never leak database internals to the client
            ApiError::Database(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "kind": self.kind(),
            "error": message,
        }))
    }
}
