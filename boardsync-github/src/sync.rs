//! Sync driver: mark each selected issue as done on the project board
//!
//! One run resolves the project metadata, selects the issues and then walks
//! them strictly in order. Per issue the flow is:
//!
//! ```text
//! Selected -> NoNodeId      -> Skipped
//!          -> NoProjectItem -> Skipped
//!          -> Updated       -> Done
//! ```
//!
//! Skips are reported and the run continues; any API error ends the run.

use std::fmt;
use std::io::Write;

use tracing::{info, warn};

use crate::{GitHubClient, Issue, IssueSelection, ProjectMetadata, Result};

/// What happened to one issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOutcome {
    /// Status was set to the done option
    Updated,
    /// The issue payload had no node id
    MissingNodeId,
    /// The issue has no item on the target project
    NotOnProject,
}

impl IssueOutcome {
    pub fn is_skip(self) -> bool {
        !matches!(self, IssueOutcome::Updated)
    }
}

/// Outcome for a single issue number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    pub number: u64,
    pub outcome: IssueOutcome,
}

/// Result of a full run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub issues: Vec<IssueReport>,
}

impl SyncReport {
    /// Number of issues whose status was changed
    pub fn updated(&self) -> usize {
        self.issues.iter().filter(|r| !r.outcome.is_skip()).count()
    }

    /// Number of issues skipped
    pub fn skipped(&self) -> usize {
        self.issues.iter().filter(|r| r.outcome.is_skip()).count()
    }
}

/// Formats a report line with the option name the run targets
struct ReportLine<'a> {
    number: u64,
    outcome: IssueOutcome,
    done_option: &'a str,
}

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            IssueOutcome::Updated => write!(
                f,
                "- #{}: status updated to {}",
                self.number, self.done_option
            ),
            IssueOutcome::MissingNodeId => {
                write!(f, "- #{}: missing node id, skipping", self.number)
            }
            IssueOutcome::NotOnProject => {
                write!(f, "- #{}: not present on project, skipping", self.number)
            }
        }
    }
}

/// Runs one synchronization pass against a client
pub struct StatusSync<'a> {
    client: &'a GitHubClient,
}

impl<'a> StatusSync<'a> {
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Resolve metadata, select issues and update each one, writing
    /// progress lines to `out`
    pub async fn run<W: Write>(
        &self,
        selection: &IssueSelection,
        out: &mut W,
    ) -> Result<SyncReport> {
        let project = self.client.project();

        let metadata = self.client.resolve_project_metadata().await?;
        let issues = self.client.select_issues(selection).await?;

        writeln!(
            out,
            "Updating {} issue(s) to {}={} on project {}...",
            issues.len(),
            project.status_field,
            project.done_option,
            project.number
        )?;

        let mut report = SyncReport::default();
        for issue in &issues {
            let outcome = self.process_issue(issue, &metadata).await?;

            writeln!(
                out,
                "{}",
                ReportLine {
                    number: issue.number,
                    outcome,
                    done_option: &project.done_option,
                }
            )?;

            report.issues.push(IssueReport {
                number: issue.number,
                outcome,
            });
        }

        Ok(report)
    }

    async fn process_issue(
        &self,
        issue: &Issue,
        metadata: &ProjectMetadata,
    ) -> Result<IssueOutcome> {
        let Some(node_id) = issue.node_id.as_deref().filter(|id| !id.is_empty()) else {
            warn!(number = issue.number, "Issue has no node id, skipping");
            return Ok(IssueOutcome::MissingNodeId);
        };

        let Some(item_id) = self
            .client
            .find_project_item(node_id, &metadata.project_id)
            .await?
        else {
            warn!(number = issue.number, "Issue is not on the project, skipping");
            return Ok(IssueOutcome::NotOnProject);
        };

        self.client
            .set_single_select_value(
                &metadata.project_id,
                &item_id,
                &metadata.field_id,
                &metadata.option_id,
            )
            .await?;

        info!(number = issue.number, item_id = %item_id, "Issue marked done");
        Ok(IssueOutcome::Updated)
    }
}
