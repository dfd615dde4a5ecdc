//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores de la aplicación y su
//! conversión a respuestas HTTP. El sobre de error del API es
//! `{ error, details? }`; los mensajes visibles para el usuario
//! están en árabe, como el resto del contrato del API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Error de base de datos con mensaje de contexto para el cliente
    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("بيانات غير صالحة")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Violación de unicidad. El contrato del API la devuelve como 400,
    /// no como 409.
    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Internal(String),

    #[error("تم تجاوز الحد الأقصى للطلبات. يرجى المحاولة لاحقاً.")]
    RateLimitExceeded,
}

impl AppError {
    /// Construir un error de base de datos con contexto
    pub fn database(message: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }
}

/// Verificar si un error de sqlx es una violación de unicidad (23505)
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database { message, source } => {
                tracing::error!("error de base de datos: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: message,
                        details: Some(json!(source.to_string())),
                    },
                )
            }

            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "بيانات غير صالحة".to_string(),
                    details: Some(json!(errors)),
                },
            ),

            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),

            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),

            AppError::Duplicate(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),

            AppError::Internal(message) => {
                tracing::error!("error interno: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "خطأ غير متوقع".to_string(),
                        details: Some(json!(message)),
                    },
                )
            }

            AppError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "تم تجاوز الحد الأقصى للطلبات. يرجى المحاولة لاحقاً."
                        .to_string(),
                    details: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_400() {
        let response = AppError::Duplicate("موجود مسبقاً".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("غير موجود".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rate_limit_maps_to_429() {
        let response = AppError::RateLimitExceeded.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
