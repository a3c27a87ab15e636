use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// `Path` whose parse failures become 404 instead of axum's 400.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// JSON body extractor.
///
/// Anything that is not a JSON object is a malformed request (500). An object
/// missing required fields or carrying wrong types is unprocessable (422).
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        if !value.is_object() {
            return Err(ApiError::MalformedBody(format!(
                "expected a JSON object, got {value}"
            )));
        }
        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| ApiError::Unprocessable(e.to_string()))
    }
}
