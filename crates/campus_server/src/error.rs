//! HTTP error translation.
//!
//! # Invariants
//! - Every failure body is `{"type": ..., "message": ...}`.
//! - Storage faults never leak SQL detail beyond the message string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::db::DbError;
use campus_core::{AccessError, ServiceError};
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{message}")]
    BadRequest { kind: &'static str, message: String },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn missing_param(name: &str) -> Self {
        Self::BadRequest {
            kind: "MissingServletRequestParameterException",
            message: format!("Required parameter '{name}' is not present"),
        }
    }

    pub fn type_mismatch(name: &str, raw: &str) -> Self {
        Self::BadRequest {
            kind: "MethodArgumentTypeMismatchException",
            message: format!("Failed to convert value '{raw}' for parameter '{name}'"),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "EntityNotFoundException",
            Self::Forbidden(_) => "AccessDeniedException",
            Self::BadRequest { kind, .. } => kind,
            Self::Internal(_) => "InternalError",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(message) = &self {
            error!("event=request_failed module=http status=error error={message}");
        }

        let body = ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { .. } => Self::NotFound(value.to_string()),
            ServiceError::MissingKey(_) => Self::BadRequest {
                kind: "MissingServletRequestParameterException",
                message: value.to_string(),
            },
            ServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(value: AccessError) -> Self {
        Self::Forbidden(value.to_string())
    }
}

/// Failures that stop the server before or while serving.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("record store unavailable: {0}")]
    Db(#[from] DbError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}
