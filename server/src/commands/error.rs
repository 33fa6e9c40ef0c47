//! HTTP error mapping
//!
//! Every handler returns `Result<_, ApiError>`; the error renders as
//! `{ "message": ..., "error": ... }` with the matching status code.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Wire shape of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Referenced list or item does not exist
    #[error("{0}")]
    NotFound(String),
    /// Request body or field constraints violated
    #[error("{0}")]
    Validation(String),
    /// The store failed; `detail` is the underlying error
    #[error("{message}: {detail}")]
    Storage { message: String, detail: String },
    /// The database is still initializing
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    /// Map a domain error, using `context` as the message of storage failures
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::InvalidInput(msg) => ApiError::Validation(msg),
            DomainError::NotReady(msg) => ApiError::Unavailable(msg),
            DomainError::Internal(detail) => ApiError::Storage {
                message: context.to_string(),
                detail,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Storage { message, detail } => ErrorBody {
                message: message.clone(),
                error: Some(detail.clone()),
            },
            other => ErrorBody {
                message: other.to_string(),
                error: None,
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::from_domain(err, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

/// `Json` extractor whose rejections render as [`ErrorBody`]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_mapping() {
        let err = ApiError::from_domain(DomainError::NotFound("list x".into()), "ctx");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from_domain(DomainError::InvalidInput("bad".into()), "ctx");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from_domain(DomainError::NotReady("init".into()), "ctx");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_storage_body_carries_detail() {
        let err = ApiError::from_domain(DomainError::Internal("disk full".into()), "Error creating list");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(),
            ErrorBody {
                message: "Error creating list".to_string(),
                error: Some("disk full".to_string()),
            }
        );
    }

    #[test]
    fn test_client_error_body_has_no_detail() {
        let body = ApiError::NotFound("Grocery list x not found".into()).body();
        assert_eq!(body.message, "Grocery list x not found");
        assert!(body.error.is_none());
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("error").is_none());
    }
}
