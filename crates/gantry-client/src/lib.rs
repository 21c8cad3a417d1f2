//! Gantry deployment client.
//!
//! This crate deploys packaged application artifacts to a running
//! application-server instance over its management REST API and
//! supports symmetric undeployment.
//!
//! # Protocol
//!
//! A deployment is a single round-trip-then-verify sequence:
//!
//! 1. Multipart `POST` to the deployment-collection endpoint with a
//!    JSON `model` part (deployment name and targets) and a
//!    `deployment` part carrying the artifact bytes. The server must
//!    answer `201 Created` with a `Location` header.
//! 2. `GET` on the created resource. The server must answer `200 OK`
//!    with a JSON status payload; servlet routes are extracted from it
//!    leniently.
//!
//! Undeployment is a `DELETE` against the per-deployment endpoint,
//! expecting `200 OK`. All requests carry HTTP Basic auth and a
//! CSRF-protection header.
//!
//! # Example
//!
//! ```ignore
//! use gantry_client::{Artifact, ClientConfig, DeploymentClient};
//!
//! let config = ClientConfig {
//!     admin_url: "http://localhost:7001".to_owned(),
//!     admin_username: "weblogic".to_owned(),
//!     admin_password: "welcome1".to_owned(),
//!     target: "AdminServer".to_owned(),
//!     request_timeout_secs: 30,
//! };
//!
//! let client = DeploymentClient::new(config)?;
//! let artifact = Artifact::from_path("target/test.war")?;
//!
//! let metadata = client.deploy(&artifact).await?;
//! println!("deployed to {}:{}", metadata.host, metadata.port);
//! for route in &metadata.routes {
//!     println!("  {route}");
//! }
//!
//! client.undeploy(&artifact).await?;
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types at the crate root
pub use client::DeploymentClient;
pub use config::ClientConfig;
pub use error::{DeployError, DeployResult};
pub use types::{Artifact, ConnectionMetadata, DeploymentName, ServletRoute};
