use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Every failure a handler can report. Each variant renders to one fixed JSON
/// body; the wrapped detail only goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("unprocessable request: {0}")]
    Unprocessable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "You made a bad request.",
            Self::NotFound => "The resource you requested was not found.",
            Self::MethodNotAllowed(_) => "This method is not allowed, sorry.",
            Self::Unprocessable(_) => "The request you made was not processable.",
            Self::Internal(_) => "There's a problem with the server.",
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        Self::Internal(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(error) => tracing::error!("Internal error: {error:#}"),
            Self::NotFound => tracing::debug!("Not found"),
            other => tracing::warn!("{other}"),
        }
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("no handler for this method".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404_with_fixed_message() {
        let (status, body) = body_of(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": 404,
                "message": "The resource you requested was not found."
            })
        );
    }

    #[tokio::test]
    async fn unprocessable_is_422() {
        let (status, body) = body_of(ApiError::Unprocessable("empty pool".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "The request you made was not processable.");
    }

    #[tokio::test]
    async fn method_not_allowed_is_405() {
        let (status, body) = body_of(ApiError::MethodNotAllowed("insert failed".into())).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], 405);
        assert_eq!(body["message"], "This method is not allowed, sorry.");
    }

    #[tokio::test]
    async fn bad_request_is_400() {
        let (status, body) = body_of(ApiError::BadRequest("not json".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "You made a bad request.");
    }

    #[tokio::test]
    async fn database_errors_hide_their_detail() {
        let (status, body) = body_of(sqlx::Error::PoolTimedOut.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "There's a problem with the server.");
        assert_eq!(body["success"], false);
    }
}
