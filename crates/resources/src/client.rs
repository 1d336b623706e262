use std::time::Duration;

use {
    async_trait::async_trait,
    reqwest::{Client, Method},
    serde_json::Value,
    tracing::debug,
    url::Url,
};

use crate::error::{Error, Result};

/// Network access to backend resources addressed by path
/// (`/companies/5`, `/companies/5/users`).
///
/// Every call is exactly one round-trip. Failures are returned immediately;
/// there is no retry, deduplication or batching at this layer.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// GET a record or a collection.
    async fn fetch(&self, path: &str) -> Result<Value>;

    /// POST `payload` to a collection and return the created record.
    async fn create(&self, path: &str, payload: Value) -> Result<Value>;

    /// DELETE a record and return whatever the backend echoes back.
    async fn delete(&self, path: &str) -> Result<Value>;
}

/// [`ResourceClient`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    client: Client,
    base_url: String,
}

impl HttpResourceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Client { source })?;
        Self::with_client(client, base_url)
    }

    /// Use an existing `reqwest::Client` (and its connection pool).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|source| Error::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        let raw = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        Url::parse(&raw).map_err(|source| Error::InvalidUrl { url: raw, source })
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path)?;
        debug!(%method, %url, "backend call");

        let mut req = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");
        if let Some(body) = body {
            req = req.json(&body);
        }

        let request_err = |source: reqwest::Error| Error::Request {
            method: method.clone(),
            path: path.to_string(),
            source,
        };
        let resp = req.send().await.map_err(request_err)?;

        let status = resp.status();
        let text = resp.text().await.map_err(request_err)?;
        if !status.is_success() {
            return Err(Error::status(method, path, status.as_u16(), text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| Error::Decode {
            method,
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn create(&self, path: &str, payload: Value) -> Result<Value> {
        self.send(Method::POST, path, Some(payload)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, None).await
    }
}
