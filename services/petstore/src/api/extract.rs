//! Request extractors that report failures as `ApiError`s.
//!
//! Axum's stock `Json` and `Path` extractors answer with plain-text bodies and
//! mixed status codes; these wrappers fold every schema failure into a 422
//! with the shared error body.
use crate::api::error::{ApiError, api_validation_error};
use axum::Json;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// JSON body that has been deserialized and passed `Validate`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| api_validation_error(&rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| api_validation_error(&errors.to_string()))?;
        Ok(Self(value))
    }
}

/// Single UUID path segment, e.g. `/owners/:owner_id`.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| api_validation_error(&rejection.body_text()))?;
        Ok(Self(id))
    }
}
