//! Project board metadata: project, status field and done option ids

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::{Error, GitHubClient, Result};

/// Identifiers needed to set an item's status on the target project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// ProjectV2 node id
    pub project_id: String,
    /// Node id of the single-select status field
    pub field_id: String,
    /// Id of the option to set on that field
    pub option_id: String,
}

#[derive(Debug, Deserialize)]
struct ProjectOwnerData {
    #[serde(default)]
    user: Option<ProjectOwner>,
    #[serde(default)]
    organization: Option<ProjectOwner>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectOwner {
    project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    fields: FieldConnection,
}

#[derive(Debug, Deserialize)]
struct FieldConnection {
    #[serde(default)]
    nodes: Vec<Option<FieldNode>>,
}

/// Non-single-select fields come back as empty objects
#[derive(Debug, Deserialize)]
struct FieldNode {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    options: Vec<FieldOption>,
}

#[derive(Debug, Deserialize)]
struct FieldOption {
    id: String,
    name: String,
}

fn project_query(owner_field: &str) -> String {
    format!(
        r#"
            query($owner: String!, $number: Int!) {{
                {owner_field}(login: $owner) {{
                    projectV2(number: $number) {{
                        id
                        fields(first: 20) {{
                            nodes {{
                                ... on ProjectV2SingleSelectField {{
                                    id
                                    name
                                    options {{ id name }}
                                }}
                            }}
                        }}
                    }}
                }}
            }}
        "#
    )
}

impl GitHubClient {
    /// Look up the project id, the status field id and the done option id
    ///
    /// Fails if the project is missing or either name has no exact match.
    pub async fn resolve_project_metadata(&self) -> Result<ProjectMetadata> {
        let project = self.project();
        debug!(
            owner = %project.owner,
            kind = %project.owner_kind,
            number = project.number,
            "Resolving project metadata"
        );

        let variables = json!({
            "owner": project.owner,
            "number": project.number,
        });

        let data: ProjectOwnerData = self
            .graphql(&project_query(project.owner_kind.graphql_field()), variables)
            .await?;

        let node = data
            .user
            .or(data.organization)
            .and_then(|owner| owner.project_v2)
            .ok_or_else(|| Error::ProjectNotFound {
                owner: project.owner.clone(),
                number: project.number,
            })?;

        let metadata =
            select_status_option(node, &project.status_field, &project.done_option)?;

        info!(
            project_id = %metadata.project_id,
            field_id = %metadata.field_id,
            option_id = %metadata.option_id,
            "Resolved project metadata"
        );

        Ok(metadata)
    }
}

/// Pick the first field named `field_name`, then its option named `option_name`
fn select_status_option(
    node: ProjectNode,
    field_name: &str,
    option_name: &str,
) -> Result<ProjectMetadata> {
    let field = node
        .fields
        .nodes
        .into_iter()
        .flatten()
        .find(|f| f.name.as_deref() == Some(field_name))
        .ok_or_else(|| Error::FieldNotFound(field_name.to_string()))?;

    let field_id = field
        .id
        .ok_or_else(|| Error::FieldNotFound(field_name.to_string()))?;

    let option_id = field
        .options
        .into_iter()
        .find(|o| o.name == option_name)
        .map(|o| o.id)
        .ok_or_else(|| Error::OptionNotFound {
            field: field_name.to_string(),
            option: option_name.to_string(),
        })?;

    Ok(ProjectMetadata {
        project_id: node.id,
        field_id,
        option_id,
    })
}
