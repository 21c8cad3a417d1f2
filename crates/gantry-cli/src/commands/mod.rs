//! CLI subcommand implementations.

pub mod deploy;
pub mod undeploy;

use anyhow::Context;
use gantry_client::{ClientConfig, DeploymentClient};

use crate::ConnectionArgs;

/// Build a deployment client from the configuration file, environment
/// and command-line overrides.
pub(crate) fn build_client(connection: &ConnectionArgs) -> anyhow::Result<DeploymentClient> {
    let mut config = match &connection.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::load().context("failed to load configuration")?,
    };

    if let Some(admin_url) = &connection.admin_url {
        config.admin_url = admin_url.clone();
    }
    if let Some(username) = &connection.username {
        config.admin_username = username.clone();
    }
    if let Some(password) = &connection.password {
        config.admin_password = password.clone();
    }
    if let Some(target) = &connection.target {
        config.target = target.clone();
    }

    DeploymentClient::new(config).context("invalid deployment configuration")
}
