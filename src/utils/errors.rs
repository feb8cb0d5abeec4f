//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::repositories::RepositoryError;

/// Categoría de un error, usada por el adaptador HTTP y por los logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Persistence,
    Configuration,
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Insurance not found: {0}")]
    InsuranceNotFound(Uuid),

    #[error("Contract not found: {0}")]
    ContractNotFound(String),

    #[error("Quote not found: {0}")]
    QuoteNotFound(Uuid),

    #[error("Vehicle {0} is not available for the requested period")]
    VehicleNotAvailable(String),

    #[error("Contract {0} is already closed")]
    ContractAlreadyClosed(Uuid),

    #[error("Vehicle {vehicle_id} is not rented by client {client_id}")]
    VehicleNotRentedByClient { client_id: Uuid, vehicle_id: Uuid },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid return data: {0}")]
    InvalidReturnData(String),

    #[error("Unrecognized vehicle condition: '{0}'")]
    UnrecognizedCondition(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Persistence error: {0}")]
    Persistence(#[from] RepositoryError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ClientNotFound(_)
            | AppError::VehicleNotFound(_)
            | AppError::InsuranceNotFound(_)
            | AppError::ContractNotFound(_)
            | AppError::QuoteNotFound(_) => ErrorKind::NotFound,

            AppError::VehicleNotAvailable(_)
            | AppError::ContractAlreadyClosed(_)
            | AppError::VehicleNotRentedByClient { .. }
            | AppError::Conflict(_) => ErrorKind::Conflict,

            AppError::InvalidDate(_)
            | AppError::InvalidDuration(_)
            | AppError::InvalidPrice(_)
            | AppError::InvalidReturnData(_)
            | AppError::UnrecognizedCondition(_)
            | AppError::Validation(_) => ErrorKind::Validation,

            AppError::Persistence(_) => ErrorKind::Persistence,
            AppError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Código estable expuesto en las respuestas JSON
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ClientNotFound(_) => "CLIENT_NOT_FOUND",
            AppError::VehicleNotFound(_) => "VEHICLE_NOT_FOUND",
            AppError::InsuranceNotFound(_) => "INSURANCE_NOT_FOUND",
            AppError::ContractNotFound(_) => "CONTRACT_NOT_FOUND",
            AppError::QuoteNotFound(_) => "QUOTE_NOT_FOUND",
            AppError::VehicleNotAvailable(_) => "VEHICLE_NOT_AVAILABLE",
            AppError::ContractAlreadyClosed(_) => "CONTRACT_ALREADY_CLOSED",
            AppError::VehicleNotRentedByClient { .. } => "VEHICLE_NOT_RENTED_BY_CLIENT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidDate(_) => "INVALID_DATE",
            AppError::InvalidDuration(_) => "INVALID_DURATION",
            AppError::InvalidPrice(_) => "INVALID_PRICE",
            AppError::InvalidReturnData(_) => "INVALID_RETURN_DATA",
            AppError::UnrecognizedCondition(_) => "UNRECOGNIZED_CONDITION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        let (status, error_response) = match self.kind() {
            ErrorKind::NotFound => {
                tracing::debug!("Resource not found: {}", self);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: self.to_string(),
                        details: None,
                        code,
                    },
                )
            }

            ErrorKind::Conflict => {
                tracing::warn!("Conflict: {}", self);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: self.to_string(),
                        details: None,
                        code,
                    },
                )
            }

            ErrorKind::Validation => {
                tracing::debug!("Validation error: {}", self);
                let details = match &self {
                    AppError::Validation(errors) => Some(json!(errors)),
                    _ => None,
                };
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: self.to_string(),
                        details,
                        code,
                    },
                )
            }

            ErrorKind::Persistence | ErrorKind::Configuration => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": self.to_string() })),
                        code,
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}
