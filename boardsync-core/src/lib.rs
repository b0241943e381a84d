//! Boardsync Core - configuration and credentials
//!
//! This crate holds everything a sync run needs before it touches the
//! network: which project board to target and the token to reach it with.

pub mod config;
pub mod credentials;
pub mod error;

pub use config::{Config, GitHubConfig, OwnerKind, ProjectConfig};
pub use credentials::Credentials;
pub use error::{Error, Result};
