//! Authenticated HTTP access to the GitHub REST and GraphQL endpoints
//!
//! Everything that goes over the network passes through [`Transport`].
//! Higher layers only see parsed JSON.

use async_trait::async_trait;
use boardsync_core::{Credentials, GitHubConfig};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{Error, Result};

/// Raw JSON access to the GitHub API
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET <api_url>/<path>?<query>` and return the parsed body
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;

    /// `POST <api_url>/graphql` with a `{query, variables}` body
    async fn post_graphql(&self, body: &Value) -> Result<Value>;
}

/// [`Transport`] backed by a shared reqwest client
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl HttpTransport {
    /// Build a transport for the configured API with the given token
    pub fn new(config: &GitHubConfig, credentials: &Credentials) -> Result<Self> {
        let base_url = config.base_url()?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: credentials.token().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Parse(format!("Invalid request path '{}': {}", path, e)))
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Failed to parse response body: {}", e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint(path)?;
        debug!(method = "GET", %url, ?query, "GitHub request");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .query(query)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn post_graphql(&self, body: &Value) -> Result<Value> {
        let url = self.endpoint("graphql")?;
        debug!(method = "POST", %url, "GitHub GraphQL request");

        // .json() sets Content-Type: application/json
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
