use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;
use tracing::error;

use crate::registration::password::HashError;
use crate::response::Envelope;

/// Fatal per-request failures. Validation rejections are not errors at
/// this level; handlers return a 400 envelope for those directly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("password hashing unavailable: {0}")]
    Hashing(#[from] HashError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "request failed");
        let body: Envelope<serde_json::Value> =
            Envelope::errors(vec![self.to_string()]);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
