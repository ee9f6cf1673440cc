//! Request extractors.

use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use naijafix_common::AppError;

/// JSON body extractor that reports malformed input as a bad request.
///
/// The stock `axum::Json` rejection answers with 422 for type mismatches;
/// every client input error here is a 400 with the standard error envelope.
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
