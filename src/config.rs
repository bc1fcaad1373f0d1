//! Client configuration
//!
//! Loaded from YAML, then overridden from the environment:
//!
//! ```yaml
//! base_url: https://api.example.com
//! project: my-project
//! token: ${from your identity provider}
//! timeout_secs: 30
//! max_tries: 15
//! rate_limit:
//!   requests_per_second: 20
//!   burst_size: 20
//! headers:
//!   x-client-app: wind-farm-sync
//! ```
//!
//! | Variable        | Field       |
//! |-----------------|-------------|
//! | `DMS_BASE_URL`  | `base_url`  |
//! | `DMS_PROJECT`   | `project`   |
//! | `DMS_TOKEN`     | `token`     |
//! | `DMS_MAX_TRIES` | `max_tries` |

use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use crate::retry::DEFAULT_MAX_TRIES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Connection and retry settings for [`crate::DmsClient`]
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service root, e.g. `https://api.example.com`
    #[serde(default)]
    pub base_url: String,

    /// Project all resource paths are scoped to
    #[serde(default)]
    pub project: String,

    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per fetch, including the first
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,

    /// Client-side throttling
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tries() -> u32 {
    DEFAULT_MAX_TRIES
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            project: String::new(),
            token: None,
            timeout_secs: default_timeout_secs(),
            max_tries: default_max_tries(),
            rate_limit: None,
            headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a test server: one attempt per fetch
    pub fn for_tests(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            project: "test".to_string(),
            max_tries: 1,
            ..Self::default()
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Apply `DMS_*` overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `DMS_*` overrides from an arbitrary lookup
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("DMS_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(project) = lookup("DMS_PROJECT") {
            self.project = project;
        }
        if let Some(token) = lookup("DMS_TOKEN") {
            self.token = Some(token);
        }
        if let Some(max_tries) = lookup("DMS_MAX_TRIES") {
            self.max_tries = max_tries.trim().parse().map_err(|_| {
                Error::config(format!("DMS_MAX_TRIES must be a positive integer, got '{max_tries}'"))
            })?;
        }
        Ok(self)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        if self.project.trim().is_empty() {
            return Err(Error::missing_field("project"));
        }
        url::Url::parse(&self.base_url)?;
        if self.max_tries == 0 {
            return Err(Error::config("max_tries must be at least 1"));
        }
        Ok(())
    }

    /// Root of all project-scoped resource paths
    pub fn project_url(&self) -> String {
        format!(
            "{}/api/v1/projects/{}",
            self.base_url.trim_end_matches('/'),
            self.project
        )
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("project", &self.project)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tries", &self.max_tries)
            .field("rate_limit", &self.rate_limit)
            .field("headers", &self.headers)
            .finish()
    }
}
