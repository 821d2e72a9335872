use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    error::AppError,
    validation::{Validate, ValidationErrors},
};

/// JSON body that deserialized into `T` and passed `T::validate`.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            let text = rejection.body_text();
            let field = offending_field(&text).unwrap_or("body").to_owned();
            AppError::Validation(ValidationErrors::single(field, text))
        })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string that deserialized into `T` and passed `T::validate`.
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::Validation(ValidationErrors::single("query", rejection.body_text()))
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Integer record id taken from the `:id` path segment.
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation(ValidationErrors::single("id", "must be an integer")))?;
        Ok(Self(id))
    }
}

/// Field named by a body rejection. Type errors lead with the serde path
/// (`full_name: invalid type: ...`); missing and unknown fields quote the
/// name (`missing field `email``).
fn offending_field(message: &str) -> Option<&str> {
    let detail = message.split_once(": ").map_or(message, |(_, rest)| rest);
    if let Some((path, _)) = detail.split_once(": ") {
        if !path.is_empty() && !path.contains(char::is_whitespace) && !path.contains('`') {
            return Some(path);
        }
    }
    let start = detail.find("field `")? + "field `".len();
    let rest = &detail[start..];
    let end = rest.find('`')?;
    Some(&rest[..end])
}
