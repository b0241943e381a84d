//! Issue fetching and selection

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{GitHubClient, Result};

/// Page size of the label scan; nothing past the first page is fetched
pub const LABEL_SCAN_LIMIT: usize = 100;

/// Issue state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Issue label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Issue as returned by the REST issues endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// GraphQL node id
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: Option<IssueState>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    /// Present (even as null) only when the entry is a pull request
    #[serde(default, deserialize_with = "present")]
    pull_request: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Issue {
    /// Whether the issues endpoint returned a pull request
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Whether the issue carries the named label
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

/// Which issues a run should touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSelection {
    /// These issue numbers, fetched one by one in ascending order
    Explicit(BTreeSet<u64>),
    /// Closed issues carrying the configured label
    Labeled,
}

impl IssueSelection {
    /// Explicit selection from command-line numbers, label scan if none given
    pub fn from_numbers(numbers: impl IntoIterator<Item = u64>) -> Self {
        let numbers: BTreeSet<u64> = numbers.into_iter().collect();
        if numbers.is_empty() {
            IssueSelection::Labeled
        } else {
            IssueSelection::Explicit(numbers)
        }
    }
}

impl GitHubClient {
    /// Fetch a single issue by number
    pub async fn get_issue(&self, number: u64) -> Result<Issue> {
        debug!(number, "Fetching issue");

        let path = format!("{}/issues/{}", self.repo_path(), number);
        let issue: Issue = self.rest_get(&path, &[]).await?;

        if issue.state == Some(IssueState::Open) {
            warn!(number, "Requested issue is still open");
        }

        Ok(issue)
    }

    /// Closed issues carrying the configured label, pull requests removed
    ///
    /// Only the first page of up to [`LABEL_SCAN_LIMIT`] entries is read.
    pub async fn list_closed_labeled_issues(&self) -> Result<Vec<Issue>> {
        let label = &self.project().label;
        debug!(label = %label, "Listing closed labeled issues");

        let path = format!("{}/issues", self.repo_path());
        let query = [
            ("state", "closed".to_string()),
            ("labels", label.clone()),
            ("per_page", LABEL_SCAN_LIMIT.to_string()),
        ];
        let entries: Vec<Issue> = self.rest_get(&path, &query).await?;

        if entries.len() >= LABEL_SCAN_LIMIT {
            warn!(
                limit = LABEL_SCAN_LIMIT,
                "Label scan returned a full page; older issues were not fetched"
            );
        }

        let issues: Vec<Issue> = entries
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .collect();

        info!(count = issues.len(), "Fetched closed labeled issues");

        Ok(issues)
    }

    /// Resolve a selection into issue records
    pub async fn select_issues(&self, selection: &IssueSelection) -> Result<Vec<Issue>> {
        match selection {
            IssueSelection::Explicit(numbers) => {
                let mut issues = Vec::with_capacity(numbers.len());
                for &number in numbers {
                    issues.push(self.get_issue(number).await?);
                }
                Ok(issues)
            }
            IssueSelection::Labeled => self.list_closed_labeled_issues().await,
        }
    }
}
