//! Core types for gantry-client.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};

/// A packaged application artifact ready for deployment.
///
/// An artifact is an opaque handle: a file name plus the raw archive
/// bytes. The file name matters because the server-side deployment
/// name is derived from it.
#[derive(Debug, Clone)]
pub struct Artifact {
    file_name: String,
    contents: Vec<u8>,
}

impl Artifact {
    /// Create an artifact from an in-memory byte buffer.
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
        }
    }

    /// Read an artifact from disk.
    ///
    /// The final path component becomes the artifact file name.
    pub fn from_path(path: impl AsRef<Path>) -> DeployResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                DeployError::config(format!(
                    "artifact path has no file name: {}",
                    path.display()
                ))
            })?
            .to_owned();
        let contents = std::fs::read(path)?;

        Ok(Self {
            file_name,
            contents,
        })
    }

    /// The artifact's file name, e.g. `test.war`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The raw archive bytes.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Consume the artifact, returning the raw archive bytes.
    #[must_use]
    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }

    /// The server-side deployment name for this artifact.
    #[must_use]
    pub fn deployment_name(&self) -> DeploymentName {
        DeploymentName::derive(&self.file_name)
    }
}

/// Server-side identifier for a deployed artifact.
///
/// Derived from the artifact file name by truncating at the first
/// `'.'`. Derivation is pure: the same file name always yields the
/// same deployment name, so deploy and a later undeploy of the same
/// artifact agree on the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentName(String);

impl DeploymentName {
    /// Derive a deployment name from an artifact file name.
    ///
    /// `test.war` becomes `test`; a file name without a `'.'` is used
    /// unchanged.
    #[must_use]
    pub fn derive(file_name: &str) -> Self {
        match file_name.find('.') {
            Some(index) => Self(file_name[..index].to_owned()),
            None => Self(file_name.to_owned()),
        }
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DeploymentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A servlet route discovered for a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServletRoute {
    /// Servlet name as reported by the server.
    pub servlet_name: String,
    /// Context path the servlet is mapped under.
    pub context_path: String,
}

impl ServletRoute {
    /// Create a new servlet route.
    #[must_use]
    pub fn new(servlet_name: impl Into<String>, context_path: impl Into<String>) -> Self {
        Self {
            servlet_name: servlet_name.into(),
            context_path: context_path.into(),
        }
    }
}

impl fmt::Display for ServletRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.servlet_name, self.context_path)
    }
}

/// Connection metadata for a successful deployment.
///
/// Host and port come from the configured admin URL; the routes are
/// whatever the server reported for the deployment. This is the only
/// value handed back to the caller, and the caller owns it outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMetadata {
    /// Host of the admin endpoint.
    pub host: String,
    /// Port of the admin endpoint.
    pub port: u16,
    /// Servlet routes discovered for the deployment, in server order.
    pub routes: Vec<ServletRoute>,
}
