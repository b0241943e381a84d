//! GitHub API client bound to one project board

use std::sync::Arc;

use boardsync_core::{Config, Credentials, ProjectConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};

/// GraphQL query response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

/// GitHub API client for the configured repository and project
pub struct GitHubClient {
    transport: Arc<dyn Transport>,
    project: ProjectConfig,
}

impl GitHubClient {
    /// Create a client over an existing transport
    pub fn new(transport: Arc<dyn Transport>, project: ProjectConfig) -> Self {
        Self { transport, project }
    }

    /// Create a client that talks HTTP to the configured API
    pub fn from_config(config: &Config, credentials: &Credentials) -> Result<Self> {
        let transport = HttpTransport::new(&config.github, credentials)?;
        Ok(Self::new(Arc::new(transport), config.project.clone()))
    }

    /// The project this client targets
    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    /// Path prefix for repository-scoped REST endpoints
    pub(crate) fn repo_path(&self) -> String {
        format!("repos/{}/{}", self.project.owner, self.project.repo)
    }

    /// GET a REST endpoint and decode the body
    pub(crate) async fn rest_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let body = self.transport.get_json(path, query).await?;
        serde_json::from_value(body)
            .map_err(|e| Error::Parse(format!("Unexpected response from {}: {}", path, e)))
    }

    /// Execute a GraphQL query or mutation and decode its `data`
    pub(crate) async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T> {
        debug!(?variables, "Executing GraphQL request");

        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        let body = self.transport.post_graphql(&request_body).await?;
        let response: GraphQLResponse = serde_json::from_value(body)
            .map_err(|e| Error::Parse(format!("Failed to parse GraphQL response: {}", e)))?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            return Err(Error::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        let data = response
            .data
            .ok_or_else(|| Error::Parse("GraphQL response missing data".to_string()))?;

        serde_json::from_value(data)
            .map_err(|e| Error::Parse(format!("Unexpected GraphQL data: {}", e)))
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.project.owner)
            .field("repo", &self.project.repo)
            .field("project", &self.project.number)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;

    #[derive(Debug, Deserialize)]
    struct Viewer {
        login: String,
    }

    fn client(fake: FakeTransport) -> GitHubClient {
        GitHubClient::new(Arc::new(fake), ProjectConfig::default())
    }

    #[tokio::test]
    async fn test_graphql_decodes_data() {
        let fake = FakeTransport::new().with_graphql("viewer", json!({"data": {"login": "octo"}}));
        let viewer: Viewer = client(fake).graphql("{ viewer }", json!({})).await.unwrap();
        assert_eq!(viewer.login, "octo");
    }

    #[tokio::test]
    async fn test_graphql_errors_take_precedence() {
        let fake = FakeTransport::new().with_graphql(
            "viewer",
            json!({
                "data": null,
                "errors": [{"message": "Bad credentials"}, {"message": "Second"}]
            }),
        );
        let err = client(fake)
            .graphql::<Viewer>("{ viewer }", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "GraphQL errors: Bad credentials, Second");
    }

    #[tokio::test]
    async fn test_graphql_missing_data() {
        let fake = FakeTransport::new().with_graphql("viewer", json!({}));
        let err = client(fake)
            .graphql::<Viewer>("{ viewer }", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn test_rest_get_malformed_payload() {
        let fake = FakeTransport::new().with_rest("user", json!({"id": 1}));
        let err = client(fake)
            .rest_get::<Viewer>("user", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unexpected response from user"));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let err = client(FakeTransport::new())
            .rest_get::<Viewer>("user", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[test]
    fn test_repo_path() {
        let c = client(FakeTransport::new());
        assert_eq!(c.repo_path(), "repos/AlexanderZagaynov/ascenoria");
    }
}
