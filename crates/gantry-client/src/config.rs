//! Configuration for the deployment client.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::error::{DeployError, DeployResult};

/// Configuration for a [`DeploymentClient`](crate::DeploymentClient).
///
/// An immutable value passed explicitly into client construction. All
/// four connection properties are required and checked for emptiness
/// by [`validate`](Self::validate) before any network activity.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base management REST URL of the remote server instance,
    /// e.g. `http://localhost:7001`.
    #[serde(default)]
    pub admin_url: String,

    /// Name of the administrator user.
    #[serde(default)]
    pub admin_username: String,

    /// Password of the administrator user.
    #[serde(default)]
    pub admin_password: String,

    /// Name of the deployment target. This can be the admin server
    /// itself, an individual managed server, or a cluster.
    #[serde(default)]
    pub target: String,

    /// Request timeout in seconds for each REST call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            admin_url: String::new(),
            admin_username: String::new(),
            admin_password: String::new(),
            target: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the default sources.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. `gantry.toml` in the current directory (if present)
    /// 3. Environment variables with `GANTRY_` prefix
    pub fn load() -> DeployResult<Self> {
        Figment::new()
            .merge(Toml::file("gantry.toml"))
            .merge(Env::prefixed("GANTRY_"))
            .extract()
            .map_err(|e| DeployError::Config(e.to_string()))
    }

    /// Load configuration from a specific TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> DeployResult<Self> {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("GANTRY_"))
            .extract()
            .map_err(|e| DeployError::Config(e.to_string()))
    }

    /// Check that all required properties are present and non-empty.
    pub fn validate(&self) -> DeployResult<()> {
        not_empty(&self.admin_url, "admin_url")?;
        not_empty(&self.admin_username, "admin_username")?;
        not_empty(&self.admin_password, "admin_password")?;
        not_empty(&self.target, "target")?;
        Ok(())
    }
}

fn not_empty(value: &str, property: &str) -> DeployResult<()> {
    if value.trim().is_empty() {
        return Err(DeployError::config(format!(
            "the {property} property is empty; verify the deployment configuration"
        )));
    }
    Ok(())
}
