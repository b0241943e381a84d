//! Set a single-select field value on a project item

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::{GitHubClient, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_project_v2_item_field_value: Option<UpdatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePayload {
    project_v2_item: Option<ItemId>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    id: String,
}

const UPDATE_FIELD_MUTATION: &str = r#"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
        updateProjectV2ItemFieldValue(input: {
            projectId: $projectId,
            itemId: $itemId,
            fieldId: $fieldId,
            value: { singleSelectOptionId: $optionId }
        }) {
            projectV2Item { id }
        }
    }
"#;

impl GitHubClient {
    /// Set `field_id` on `item_id` to the single-select option `option_id`
    ///
    /// The new value is not read back; any API error fails the call.
    pub async fn set_single_select_value(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<()> {
        debug!(project_id, item_id, field_id, option_id, "Updating item field");

        let variables = json!({
            "projectId": project_id,
            "itemId": item_id,
            "fieldId": field_id,
            "optionId": option_id,
        });

        let data: UpdateData = self.graphql(UPDATE_FIELD_MUTATION, variables).await?;

        let updated = data
            .update_project_v2_item_field_value
            .and_then(|p| p.project_v2_item)
            .map(|item| item.id);
        info!(item_id, updated = ?updated, "Updated item field");

        Ok(())
    }
}
