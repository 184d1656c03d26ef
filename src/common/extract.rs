// src/common/extract.rs

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::common::error::ApiError;

/// `axum::Json` whose rejection is an `ApiError`, so malformed bodies get the
/// same `{ "error": ... }` shape as every other failure. The parser message is
/// only logged.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("rejected request body: {}", rejection.body_text());
                Err(ApiError::new(rejection.status(), "Geçersiz istek gövdesi."))
            }
        }
    }
}
