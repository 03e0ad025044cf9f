//! Error types
//!
//! Two layers, following the propagation policy of the services: domain
//! operations return typed [`ServiceError`] values; the HTTP boundary
//! converts them into a [`ServerError`] response. Storage failures are the
//! only server-side errors; everything else is a client error scoped to
//! the single request.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Domain-level failure returned by the menu, inventory, order and report
/// services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("ingredient not found in inventory: {0}")]
    IngredientNotFound(String),

    #[error(
        "insufficient stock for '{name}': required {required:.2} {unit}, available {available:.2} {unit}"
    )]
    InsufficientStock {
        ingredient_id: String,
        name: String,
        unit: String,
        required: f64,
        available: f64,
    },

    #[error("order already closed: {0}")]
    AlreadyClosed(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Server-level error rendered as an HTTP response.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ServerError::Service(err) => match err {
                ServiceError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "validation_error", err.to_string())
                }
                ServiceError::NotFound(_)
                | ServiceError::ProductNotFound(_)
                | ServiceError::IngredientNotFound(_) => {
                    (StatusCode::NOT_FOUND, "not_found", err.to_string())
                }
                ServiceError::InsufficientStock { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "insufficient_stock",
                    err.to_string(),
                ),
                ServiceError::AlreadyClosed(_) | ServiceError::Conflict(_) => {
                    (StatusCode::CONFLICT, "conflict", err.to_string())
                }
                ServiceError::Store(source) => {
                    tracing::error!(error = %source, "storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_error",
                        "storage failure".to_string(),
                    )
                }
            },
            ServerError::Internal(source) => {
                tracing::error!(error = ?source, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "an internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result alias for HTTP handlers
pub type Result<T> = std::result::Result<T, ServerError>;
