//! Config schema types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpindleConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub graphql: GraphqlConfig,
}

/// Where the HTTP gateway listens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 4000,
        }
    }
}

impl ServerConfig {
    /// `bind:port`, suitable for `TcpListener::bind`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// The REST service that owns users and companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphqlConfig {
    /// Deepest selection nesting accepted; root fields are depth 1.
    pub max_depth: usize,
    /// Serve the GraphiQL explorer on `GET /graphql`.
    pub graphiql: bool,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            graphiql: true,
        }
    }
}
