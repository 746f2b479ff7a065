use std::time::Duration;

use serde::{Deserialize, Serialize};
use tabsmith_request::Endpoint;

/// Where the generation service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOptions {
    pub base_url: String,
    pub generate_path: String,
    pub generate_db_path: String,
    pub generate_from_text_path: String,
    pub health_path: String,
    /// Generation runs a language model and can take minutes.
    pub timeout_secs: u64,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            generate_path: "/generate".to_string(),
            generate_db_path: "/generate-db".to_string(),
            generate_from_text_path: "/generate-from-text".to_string(),
            health_path: "/health".to_string(),
            timeout_secs: 300,
        }
    }
}

impl ServiceOptions {
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        let path = match endpoint {
            Endpoint::Generate => &self.generate_path,
            Endpoint::GenerateDatabase => &self.generate_db_path,
            Endpoint::GenerateFromText => &self.generate_from_text_path,
        };
        self.join(path)
    }

    pub fn health_url(&self) -> String {
        self.join(&self.health_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
