//! Boardsync GitHub - project board status synchronization
//!
//! This crate reads closed issues from a repository and sets their Status
//! field to Done on a GitHub project (ProjectV2) board, using the REST API
//! for issues and GraphQL for everything project-related.

mod client;
mod error;
mod issues;
mod items;
mod project;
mod status;
pub mod sync;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::GitHubClient;
pub use error::{Error, Result};
pub use issues::{Issue, IssueSelection, IssueState, Label, LABEL_SCAN_LIMIT};
pub use project::ProjectMetadata;
pub use sync::{IssueOutcome, IssueReport, StatusSync, SyncReport};
pub use transport::{HttpTransport, Transport};
