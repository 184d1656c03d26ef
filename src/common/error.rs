use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Doğrulama hatası")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bu müşteri zaten kaydedilmiş.")]
    DuplicateCustomer,

    #[error("Müşteri bulunamadı.")]
    CustomerNotFound,

    #[error("Veritabanı hatası: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Sunucu hatası: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// Per-endpoint wording for failures the caller must not see details of.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext {
    /// Written to the server log together with the underlying error.
    pub log: &'static str,
    /// Returned to the caller as `{ "error": ... }`.
    pub public: &'static str,
}

impl ErrorContext {
    pub const fn new(log: &'static str, public: &'static str) -> Self {
        Self { log, public }
    }
}

/// What a handler actually sends back: a status plus a JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl AppError {
    pub fn to_api_error(&self, ctx: ErrorContext) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: "Bir veya daha fazla alan geçersiz.".to_string(),
                    details: Some(details),
                }
            }
            AppError::DuplicateCustomer => ApiError::new(StatusCode::BAD_REQUEST, self.to_string()),
            AppError::CustomerNotFound => ApiError::new(StatusCode::NOT_FOUND, self.to_string()),

            // DatabaseError and InternalServerError: log the cause, hide it from the caller.
            e => {
                tracing::error!("{}: {}", ctx.log, e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, ctx.public)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    const CTX: ErrorContext = ErrorContext::new("test failed", "Bir hata oluştu");

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    #[test]
    fn duplicate_is_a_bad_request_with_fixed_message() {
        let err = AppError::DuplicateCustomer.to_api_error(CTX);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Bu müşteri zaten kaydedilmiş.");
    }

    #[test]
    fn missing_customer_is_not_found() {
        let err = AppError::CustomerNotFound.to_api_error(CTX);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Müşteri bulunamadı.");
    }

    #[test]
    fn storage_failures_hide_the_cause() {
        let err = AppError::DatabaseError(sqlx::Error::PoolTimedOut).to_api_error(CTX);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Bir hata oluştu");

        let err = AppError::from(anyhow::anyhow!("bad id")).to_api_error(CTX);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Bir hata oluştu");
    }

    #[test]
    fn validation_errors_list_fields() {
        let errors = Named { name: String::new() }.validate().unwrap_err();
        let err = AppError::from(errors).to_api_error(CTX);

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        assert_eq!(details["name"], vec!["required".to_string()]);
    }
}
