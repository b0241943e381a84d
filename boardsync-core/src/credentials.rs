//! Access token loading
//!
//! The token only ever comes from the environment. It is loaded before any
//! HTTP client is built, so a missing token stops the run before the first
//! request.

use std::fmt;

use tracing::debug;

use crate::{Error, Result};

/// GitHub access token for a single run
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Read the token from the named environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        Self::from_lookup(var, |key| std::env::var(key).ok())
    }

    /// Read the token through an arbitrary variable lookup
    ///
    /// Whitespace is trimmed; an absent or blank value is an error.
    pub fn from_lookup<F>(var: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(var)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::MissingToken(var.to_string()))?;

        debug!(var, "Loaded access token from environment");
        Ok(Self { token })
    }

    /// The raw token, for the Authorization header
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token() {
        let err = Credentials::from_lookup("GITHUB_TOKEN", |_| None).unwrap_err();
        assert!(matches!(err, Error::MissingToken(ref v) if v == "GITHUB_TOKEN"));
        assert_eq!(
            err.to_string(),
            "GITHUB_TOKEN is required to update project status"
        );
    }

    #[test]
    fn test_blank_token_rejected() {
        let result = Credentials::from_lookup("GITHUB_TOKEN", |_| Some("   ".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_trimmed() {
        let creds =
            Credentials::from_lookup("GITHUB_TOKEN", |_| Some("  ghp_test\n".to_string())).unwrap();
        assert_eq!(creds.token(), "ghp_test");
    }

    #[test]
    fn test_reads_named_variable() {
        let creds = Credentials::from_lookup("CUSTOM_TOKEN", |key| {
            (key == "CUSTOM_TOKEN").then(|| "ghp_custom".to_string())
        })
        .unwrap();
        assert_eq!(creds.token(), "ghp_custom");
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::from_lookup("T", |_| Some("ghp_secret".to_string())).unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("redacted"));
    }
}
