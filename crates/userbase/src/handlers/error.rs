use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use userbase_core::storage::{repository_error_to_status_code, RepositoryError};
use userbase_core::user::ErrorMessage;

/// Request-level failures detected by handlers before or after storage.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{0}")]
    BadRequest(String),
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<ErrorMessage>),
}

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(request_error) = self.0.downcast_ref::<RequestError>() {
            return match request_error {
                RequestError::Validation(messages) => {
                    tracing::warn!(errors = messages.len(), "Validation failed");
                    (StatusCode::UNPROCESSABLE_ENTITY, Json(messages.clone())).into_response()
                }
                RequestError::BadRequest(message) => {
                    tracing::warn!(message = %message, "Bad request");
                    error_body(StatusCode::BAD_REQUEST, message)
                }
            };
        }

        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        }

        error_body(status_code, &self.0.to_string())
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_repository_error_uses_mapped_status() {
        let error: AppError = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "u1".to_string(),
        }
        .into();

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await["error"],
            "User already exists: u1"
        );
    }

    #[tokio::test]
    async fn test_validation_error_is_an_array() {
        let messages = vec![ErrorMessage {
            field: "email".to_string(),
            code: "required".to_string(),
            param: None,
            message: "email is required".to_string(),
        }];
        let error: AppError = RequestError::Validation(messages).into();

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json[0]["field"], "email");
        assert!(json[0].get("param").is_none());
    }

    #[tokio::test]
    async fn test_unknown_error_is_internal() {
        let error: AppError = anyhow::anyhow!("boom").into();

        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
