use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tabsmith_core::GenerationResponse;
use tabsmith_request::Payload;

use crate::errors::ServiceError;

/// Remote generation capability: send a payload, get rows or an error.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Send one payload to the endpoint matching its kind.
    async fn generate(&self, payload: &Payload) -> Result<GenerationResponse, ServiceError>;

    /// Ask the service whether it and its model backend are up.
    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
