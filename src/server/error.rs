use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedBody(_) | ApiError::Database(_) | ApiError::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::NotFound => "resource not found",
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::MalformedBody(_) | ApiError::Database(_) | ApiError::Metrics(_) => {
                "server_error"
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Unprocessable(reason) => tracing::warn!("Rejected request: {reason}"),
            _ if status.is_server_error() => tracing::error!("{self}"),
            _ => tracing::debug!("{self}"),
        }
        let body = Json(ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

// a path segment that does not parse as the expected id type means no such resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Path rejected: {rejection}");
        ApiError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn error_shapes() {
        let cases = [
            (ApiError::NotFound, 404, "resource not found"),
            (ApiError::MethodNotAllowed, 405, "method_not_allowed"),
            (
                ApiError::Unprocessable("no questions".to_owned()),
                422,
                "unprocessable",
            ),
            (ApiError::Database(sqlx::Error::PoolClosed), 500, "server_error"),
        ];
        for (error, code, message) in cases {
            let (status, body) = body_of(error).await;
            assert_eq!(status.as_u16(), code);
            assert_eq!(
                body,
                json!({"success": false, "error": code, "message": message})
            );
        }
    }

    #[tokio::test]
    async fn unprocessable_reason_is_not_leaked() {
        let (_, body) = body_of(ApiError::Unprocessable("secret detail".to_owned())).await;
        assert!(!body.to_string().contains("secret detail"));
    }
}
