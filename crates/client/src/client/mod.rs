//! HTTP client for userbase API.

pub mod users;

use crate::error::{ClientError, Result};

/// HTTP client for the userbase API.
#[derive(Debug, Clone)]
pub struct UserbaseClient {
    client: reqwest::Client,
    base_url: String,
}

impl UserbaseClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound {
                resource: resource.to_string(),
            })
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// Extracts a readable message from an error body.
///
/// The server answers with `{"error": "..."}` or, for validation failures,
/// an array of `{field, message}` objects. Anything else is returned as-is.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("error").and_then(|e| e.as_str()) {
            Some(message) => message.to_string(),
            None => body.to_string(),
        },
        Ok(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let field = item.get("field")?.as_str()?;
                let message = item.get("message")?.as_str()?;
                Some(format!("{field}: {message}"))
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    }
}
