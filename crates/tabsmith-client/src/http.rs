use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tabsmith_core::GenerationResponse;
use tabsmith_request::Payload;

use crate::errors::ServiceError;
use crate::options::ServiceOptions;
use crate::service::{GenerationService, HealthStatus};

/// [`GenerationService`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpGenerationService {
    client: Client,
    options: ServiceOptions,
}

impl HttpGenerationService {
    pub fn new(options: ServiceOptions) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(options.timeout())
            .build()
            .map_err(|err| ServiceError::Client(err.to_string()))?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate(&self, payload: &Payload) -> Result<GenerationResponse, ServiceError> {
        let mode = payload.mode();
        let url = self.options.url_for(payload.endpoint());
        tracing::info!(event = "request_started", mode = mode.as_str(), url = %url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(event = "request_failed", url = %url, error = %err);
                ServiceError::Transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status.as_u16(), &body);
            tracing::warn!(
                event = "request_failed",
                url = %url,
                status = status.as_u16(),
                message = %message
            );
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        let decoded = GenerationResponse::decode(mode, body)?;
        tracing::info!(
            event = "request_finished",
            mode = mode.as_str(),
            status = status.as_u16(),
            records = decoded.total_records()
        );
        Ok(decoded)
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let url = self.options.health_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        response
            .json()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))
    }
}

/// User-facing message for a non-success response.
///
/// Uses the body's `detail` when it is a string, or the first entry's `msg`
/// when it is a list of validation errors; otherwise `Error: {status}`.
pub fn error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());

    let message = match detail {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        Some(Value::Array(items)) => items.first().map(|item| match item.get("msg") {
            Some(Value::String(msg)) => msg.clone(),
            _ => item.to_string(),
        }),
        _ => None,
    };

    message.unwrap_or_else(|| format!("Error: {status}"))
}
