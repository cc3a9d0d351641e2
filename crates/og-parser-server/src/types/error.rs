//! Error types and the JSON error envelope for the HTTP service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::message::ErrorEnvelope;

/// All errors that can occur while serving a parse request.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// The caller supplied a missing or malformed URL or body.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Not Found")]
    NotFound,

    /// The target document could not be fetched.
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The document accessor failed while resolving metadata.
    #[error("Resolution error: {0}")]
    Resolution(#[from] og_parser::OgError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Retrieval(_) => StatusCode::BAD_GATEWAY,
            ServerError::Resolution(_) | ServerError::Internal(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            status: self.status().as_u16(),
            message: self.to_string(),
            error: true,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(self.to_envelope())).into_response()
    }
}

impl From<reqwest::Error> for ServerError {
    fn from(e: reqwest::Error) -> Self {
        ServerError::Retrieval(e.to_string())
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
