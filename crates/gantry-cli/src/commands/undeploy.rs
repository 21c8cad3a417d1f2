//! Implementation of the `gantry undeploy` command.

use std::path::Path;

use anyhow::Context;
use gantry_client::Artifact;

use crate::ConnectionArgs;

pub async fn run(artifact_path: &Path, connection: &ConnectionArgs) -> anyhow::Result<()> {
    let client = super::build_client(connection)?;
    let artifact = Artifact::from_path(artifact_path)
        .with_context(|| format!("failed to read artifact {}", artifact_path.display()))?;

    let name = artifact.deployment_name();
    println!("Undeploying {name}");

    client
        .undeploy(&artifact)
        .await
        .context("undeployment failed")?;

    println!("Undeployed {name}");
    Ok(())
}
