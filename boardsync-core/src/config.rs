//! Configuration management for boardsync
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables (BOARDSYNC_*)
//! 2. Config file (~/.config/boardsync/config.toml)
//! 3. Default values

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{Error, Result};

/// Kind of account that owns the project board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    #[default]
    User,
    Organization,
}

impl OwnerKind {
    /// GraphQL root field used to look up the owner
    pub fn graphql_field(self) -> &'static str {
        match self {
            OwnerKind::User => "user",
            OwnerKind::Organization => "organization",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.graphql_field())
    }
}

impl FromStr for OwnerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(OwnerKind::User),
            "organization" | "org" => Ok(OwnerKind::Organization),
            other => Err(Error::Config(format!(
                "Unknown owner kind '{}'. Expected 'user' or 'organization'",
                other
            ))),
        }
    }
}

/// The project board and repository a sync run targets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Login of the user or organization owning both repo and project
    pub owner: String,

    /// Whether `owner` is a user or an organization
    pub owner_kind: OwnerKind,

    /// Repository whose issues are synchronized
    pub repo: String,

    /// Project number as shown in the project URL
    pub number: u64,

    /// Label marking issues as done
    pub label: String,

    /// Name of the single-select status field
    pub status_field: String,

    /// Name of the option to set on the status field
    pub done_option: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            owner: "AlexanderZagaynov".to_string(),
            owner_kind: OwnerKind::User,
            repo: "ascenoria".to_string(),
            number: 2,
            label: "codex:done".to_string(),
            status_field: "Status".to_string(),
            done_option: "Done".to_string(),
        }
    }
}

/// GitHub API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API; GraphQL lives at `<api_url>/graphql`
    pub api_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Environment variable holding the access token
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: "boardsync".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

impl GitHubConfig {
    /// Parse `api_url`, normalized with a trailing slash so relative
    /// paths join underneath it
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw)
            .map_err(|e| Error::Config(format!("Invalid api_url '{}': {}", self.api_url, e)))
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Target project configuration
    pub project: ProjectConfig,

    /// GitHub API configuration
    pub github: GitHubConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/boardsync/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("boardsync").join("config.toml"))
    }

    /// Apply overrides from the process environment
    ///
    /// Supported variables:
    /// - BOARDSYNC_OWNER
    /// - BOARDSYNC_OWNER_KIND (`user` or `organization`)
    /// - BOARDSYNC_REPO
    /// - BOARDSYNC_PROJECT_NUMBER
    /// - BOARDSYNC_LABEL
    /// - BOARDSYNC_API_URL
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(owner) = var("BOARDSYNC_OWNER") {
            self.project.owner = owner;
        }

        if let Some(kind) = var("BOARDSYNC_OWNER_KIND") {
            self.project.owner_kind = kind.parse()?;
        }

        if let Some(repo) = var("BOARDSYNC_REPO") {
            self.project.repo = repo;
        }

        if let Some(number) = var("BOARDSYNC_PROJECT_NUMBER") {
            self.project.number = number.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "BOARDSYNC_PROJECT_NUMBER must be a positive integer, got '{}'",
                    number
                ))
            })?;
        }

        if let Some(label) = var("BOARDSYNC_LABEL") {
            self.project.label = label;
        }

        if let Some(api_url) = var("BOARDSYNC_API_URL") {
            self.github.api_url = api_url;
        }

        Ok(self)
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: env > config file > defaults
    pub fn load_with_overrides() -> Result<Self> {
        Self::load()?.with_env_overrides()
    }
}
