//! Configuration type definitions.
//!
//! Loaded from `~/.config/scour/config.toml` with `OS_*` environment
//! variables taking precedence, so existing cloud RC files keep working.
//!
//! # Example Configuration
//!
//! ```toml
//! [auth]
//! auth_url = "https://keystone.example.net:5000/v3"
//! username = "operator"
//! password = "secret"
//! project_name = "operator-project"
//! region = "RegionOne"
//!
//! [poll]
//! timeout_secs = 10
//! interval_secs = 1
//! ```

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScourConfig {
    /// Cloud credentials and endpoint selection.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Prerequisite polling behavior.
    #[serde(default)]
    pub poll: PollConfig,
}

/// Credentials for the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity endpoint, with or without the /v3 suffix.
    #[serde(default)]
    pub auth_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Project the credentials authenticate against by default.
    #[serde(default)]
    pub project_name: String,

    #[serde(default = "defaults::default_domain")]
    pub user_domain: String,

    #[serde(default = "defaults::default_domain")]
    pub project_domain: String,

    /// Restrict catalog endpoints to one region. None picks the first
    /// public endpoint per service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_url: String::new(),
            username: String::new(),
            password: String::new(),
            project_name: String::new(),
            user_domain: defaults::default_domain(),
            project_domain: defaults::default_domain(),
            region: None,
        }
    }
}

/// Timing for the prerequisite poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// How long to wait for a prerequisite before giving up on its
    /// resource type for this run.
    #[serde(default = "defaults::default_poll_timeout_secs")]
    pub timeout_secs: u64,

    /// Sleep between prerequisite checks.
    #[serde(default = "defaults::default_poll_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::default_poll_timeout_secs(),
            interval_secs: defaults::default_poll_interval_secs(),
        }
    }
}
