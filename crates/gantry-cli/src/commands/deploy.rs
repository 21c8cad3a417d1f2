//! Implementation of the `gantry deploy` command.

use std::path::Path;

use anyhow::Context;
use gantry_client::Artifact;

use crate::ConnectionArgs;

pub async fn run(artifact_path: &Path, connection: &ConnectionArgs) -> anyhow::Result<()> {
    let client = super::build_client(connection)?;
    let artifact = Artifact::from_path(artifact_path)
        .with_context(|| format!("failed to read artifact {}", artifact_path.display()))?;

    println!(
        "Deploying {} as {}",
        artifact_path.display(),
        artifact.deployment_name()
    );

    let metadata = client.deploy(&artifact).await.context("deployment failed")?;

    println!("Deployed to {}:{}", metadata.host, metadata.port);
    if metadata.routes.is_empty() {
        println!("  (no servlet routes reported)");
    }
    for route in &metadata.routes {
        println!("  {route}");
    }

    Ok(())
}
