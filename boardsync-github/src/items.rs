//! Locate an issue's row on the target project board

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{GitHubClient, Result};

#[derive(Debug, Deserialize)]
struct NodeData {
    node: Option<IssueNode>,
}

/// `node(id:)` resolves to `{}` for anything that is not an Issue
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    #[serde(default)]
    project_items: Option<ItemConnection>,
}

#[derive(Debug, Deserialize)]
struct ItemConnection {
    #[serde(default)]
    nodes: Vec<Option<ItemNode>>,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
    id: Option<String>,
    project: Option<ProjectRef>,
}

#[derive(Debug, Deserialize)]
struct ProjectRef {
    id: String,
}

const PROJECT_ITEMS_QUERY: &str = r#"
    query($issueId: ID!) {
        node(id: $issueId) {
            ... on Issue {
                projectItems(first: 20, includeArchived: false) {
                    nodes {
                        id
                        project { id }
                    }
                }
            }
        }
    }
"#;

impl GitHubClient {
    /// Id of the issue's item on `project_id`, if the issue is on that board
    pub async fn find_project_item(
        &self,
        issue_node_id: &str,
        project_id: &str,
    ) -> Result<Option<String>> {
        debug!(issue_node_id, project_id, "Looking up project item");

        let data: NodeData = self
            .graphql(PROJECT_ITEMS_QUERY, json!({ "issueId": issue_node_id }))
            .await?;

        let items = data
            .node
            .and_then(|n| n.project_items)
            .map(|c| c.nodes)
            .unwrap_or_default();

        Ok(items
            .into_iter()
            .flatten()
            .find(|item| item.project.as_ref().is_some_and(|p| p.id == project_id))
            .and_then(|item| item.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use boardsync_core::ProjectConfig;
    use serde_json::Value;
    use std::sync::Arc;

    async fn find(response: Value, project_id: &str) -> Option<String> {
        let fake = FakeTransport::new().with_graphql("projectItems", response);
        GitHubClient::new(Arc::new(fake), ProjectConfig::default())
            .find_project_item("I_abc", project_id)
            .await
            .unwrap()
    }

    fn items(nodes: Value) -> Value {
        json!({"data": {"node": {"projectItems": {"nodes": nodes}}}})
    }

    #[tokio::test]
    async fn test_matches_target_project_only() {
        let response = items(json!([
            {"id": "PVTI_other", "project": {"id": "P_other"}},
            {"id": "PVTI_1", "project": {"id": "P_1"}}
        ]));
        assert_eq!(find(response, "P_1").await.as_deref(), Some("PVTI_1"));
    }

    #[tokio::test]
    async fn test_not_on_project() {
        let response = items(json!([{"id": "PVTI_other", "project": {"id": "P_other"}}]));
        assert_eq!(find(response, "P_1").await, None);
    }

    #[tokio::test]
    async fn test_tolerates_null_entries() {
        let response = items(json!([null, {"id": "PVTI_1", "project": null}]));
        assert_eq!(find(response, "P_1").await, None);
    }

    #[tokio::test]
    async fn test_node_not_an_issue() {
        assert_eq!(find(json!({"data": {"node": {}}}), "P_1").await, None);
        assert_eq!(find(json!({"data": {"node": null}}), "P_1").await, None);
    }

    #[tokio::test]
    async fn test_sends_issue_node_id() {
        let fake = Arc::new(FakeTransport::new().with_graphql("projectItems", items(json!([]))));
        GitHubClient::new(fake.clone(), ProjectConfig::default())
            .find_project_item("I_abc", "P_1")
            .await
            .unwrap();
        assert_eq!(
            fake.graphql_variables("projectItems"),
            vec![json!({"issueId": "I_abc"})]
        );
    }
}
