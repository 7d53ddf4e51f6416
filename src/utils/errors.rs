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
use validator::ValidationErrors;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: code.to_string(),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not Found", "Resource not found".to_string(), "NOT_FOUND"),
            ),

            AppError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                let message = duplicate_message(db.constraint());
                tracing::warn!("⚠️ Violación de unicidad: {}", db);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Duplicate", message, "DUPLICATE"),
                )
            }

            AppError::Database(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                tracing::warn!("⚠️ Violación de clave foránea: {}", db);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "Bad Request",
                        "The resource is still referenced by other records".to_string(),
                        "REFERENCED",
                    ),
                )
            }

            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                let message = aggregate_messages(&e);
                tracing::debug!("Validation error: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Validation Error", message, "VALIDATION_ERROR")
                        .with_details(json!(e)),
                )
            }

            AppError::Unauthorized(msg) => {
                tracing::debug!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"),
                )
            }

            AppError::Forbidden(msg) => {
                tracing::debug!("Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new("Forbidden", msg, "FORBIDDEN"),
                )
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
            ),

            AppError::Duplicate(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Duplicate", msg, "DUPLICATE"),
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
            ),

            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "An unexpected error occurred".to_string(),
                        "INTERNAL_ERROR",
                    ),
                )
            }

            AppError::Jwt(msg) => {
                tracing::debug!("JWT error: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("JWT Error", msg, "JWT_ERROR"),
                )
            }

            AppError::Hash(msg) => {
                tracing::error!("❌ Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Hash Error",
                        "An error occurred while processing credentials".to_string(),
                        "HASH_ERROR",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Une todos los mensajes de validación en una sola cadena, ordenados por campo
pub fn aggregate_messages(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, err.code),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Traduce el nombre de la restricción UNIQUE de PostgreSQL a un mensaje legible
fn duplicate_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("trucks_registration_key") | Some("trailers_registration_key") => {
            "Registration number already exists".to_string()
        }
        Some("users_email_key") => "Email already registered".to_string(),
        Some("tires_vehicle_id_position_key") => {
            "Position already taken on this vehicle".to_string()
        }
        _ => "Resource already exists".to_string(),
    }
}

/// Función helper para crear errores de validación de un único campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn message_error(message: &'static str) -> ValidationError {
        let mut error = ValidationError::new("custom");
        error.message = Some(message.into());
        error
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthorized("x".into()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("x".into()).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Duplicate("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_aggregate_messages_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("year", message_error("Year out of range"));
        errors.add("brand", message_error("Brand is required"));
        errors.add("mileage", ValidationError::new("range"));

        assert_eq!(
            aggregate_messages(&errors),
            "Brand is required, mileage is invalid (range), Year out of range"
        );
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let err = validation_error("email", "Invalid email");
        match &err {
            AppError::Validation(e) => assert_eq!(aggregate_messages(e), "Invalid email"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_message() {
        assert_eq!(
            duplicate_message(Some("trucks_registration_key")),
            "Registration number already exists"
        );
        assert_eq!(duplicate_message(None), "Resource already exists");
    }
}
