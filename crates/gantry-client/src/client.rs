//! REST deployment client.
//!
//! Talks to the management REST API of a remote application-server
//! instance: deploys an artifact with a multipart POST, confirms the
//! deployment by following the created resource, and undeploys with a
//! DELETE against the per-deployment endpoint.

use reqwest::header::LOCATION;
use reqwest::{multipart, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{DeployError, DeployResult};
use crate::types::{Artifact, ConnectionMetadata, DeploymentName, ServletRoute};

/// CSRF-protection header required by the management API for
/// state-changing requests. Any non-empty value is accepted.
const CSRF_HEADER: &str = "X-Requested-By";
const CSRF_VALUE: &str = "gantry";

/// Collection path for application deployments, relative to the admin
/// URL.
const DEPLOYMENTS_PATH: &str = "management/wls/latest/deployments/application";

/// Client for deploying artifacts to a remote application server.
///
/// Holds an immutable, pre-validated configuration. Each call to
/// [`deploy`](Self::deploy) or [`undeploy`](Self::undeploy) builds its
/// own HTTP client and performs one or two blocking round trips, so
/// concurrent calls for different artifacts share no mutable state.
/// Concurrent operations against the *same* deployment name race at
/// the server; serialising those is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct DeploymentClient {
    config: ClientConfig,
}

impl DeploymentClient {
    /// Create a new deployment client.
    ///
    /// The configuration is validated eagerly: an empty required
    /// property fails here, before any network activity.
    pub fn new(config: ClientConfig) -> DeployResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// No-op lifecycle hook, kept for the container lifecycle
    /// contract.
    pub fn start(&self) -> DeployResult<()> {
        Ok(())
    }

    /// No-op lifecycle hook, kept for the container lifecycle
    /// contract.
    pub fn stop(&self) -> DeployResult<()> {
        Ok(())
    }

    /// Deploy an artifact and return its connection metadata.
    ///
    /// Issues a multipart POST against the deployment-collection
    /// endpoint, requires `201 Created`, follows the `Location` header
    /// with a GET, requires `200 OK`, and extracts the servlet routes
    /// from the status payload. The HTTP client is dropped on every
    /// exit path, releasing its connection pool whether or not the
    /// call succeeds.
    pub async fn deploy(&self, artifact: &Artifact) -> DeployResult<ConnectionMetadata> {
        let name = artifact.deployment_name();
        let admin_url = self.parse_admin_url()?;
        let endpoint = deployments_endpoint(&self.config.admin_url);

        info!(deployment = %name, target = %self.config.target, "deploying artifact");
        debug!(endpoint = %endpoint, "posting deployment");

        let client = self.http_client()?;

        let model = serde_json::json!({
            "name": name.as_str(),
            "targets": [self.config.target],
        });
        let form = multipart::Form::new()
            .part(
                "model",
                multipart::Part::text(model.to_string()).mime_str("application/json")?,
            )
            .part(
                "deployment",
                multipart::Part::bytes(artifact.contents().to_vec())
                    .file_name(artifact.file_name().to_owned())
                    .mime_str("application/octet-stream")?,
            );

        let response = self
            .authenticated(client.post(&endpoint))
            .multipart(form)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DeployError::unexpected_status("deployment POST", status, body));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(DeployError::MissingLocation)?
            .to_owned();

        debug!(location = %location, "following created deployment resource");

        let response = self.authenticated(client.get(&location)).send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DeployError::unexpected_status("deployment GET", status, body));
        }

        let body: Value = response.json().await.map_err(DeployError::Metadata)?;
        let routes = extract_routes(&body);

        let metadata = ConnectionMetadata {
            host: admin_host(&admin_url)?,
            port: admin_url.port_or_known_default().unwrap_or(80),
            routes,
        };

        info!(
            deployment = %name,
            host = %metadata.host,
            port = metadata.port,
            routes = metadata.routes.len(),
            "deployment complete"
        );

        Ok(metadata)
    }

    /// Undeploy an artifact.
    ///
    /// The deployment name is re-derived from the artifact file name
    /// with the same rule as [`deploy`](Self::deploy), so both calls
    /// agree on the server-side identifier.
    pub async fn undeploy(&self, artifact: &Artifact) -> DeployResult<()> {
        let name = artifact.deployment_name();
        self.parse_admin_url()?;
        let endpoint = format!("{}/id/{}", deployments_endpoint(&self.config.admin_url), name);

        info!(deployment = %name, "undeploying artifact");
        debug!(endpoint = %endpoint, "deleting deployment");

        let client = self.http_client()?;
        let response = self.authenticated(client.delete(&endpoint)).send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DeployError::unexpected_status(
                "undeployment DELETE",
                status,
                body,
            ));
        }

        info!(deployment = %name, "undeployment complete");
        Ok(())
    }

    /// Build a fresh HTTP client for a single deploy or undeploy call.
    ///
    /// Built per call so the connection pool is released (dropped) on
    /// every exit path, and so credentials are never cached beyond one
    /// invocation.
    fn http_client(&self) -> DeployResult<Client> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.request_timeout_secs))
            .build()?;
        Ok(client)
    }

    /// Attach Basic auth and the CSRF-protection header to a request.
    fn authenticated(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .basic_auth(&self.config.admin_username, Some(&self.config.admin_password))
            .header(CSRF_HEADER, CSRF_VALUE)
    }

    fn parse_admin_url(&self) -> DeployResult<Url> {
        Url::parse(&self.config.admin_url).map_err(|source| DeployError::InvalidAdminUrl {
            url: self.config.admin_url.clone(),
            source,
        })
    }
}

/// Compute the deployment-collection endpoint for an admin URL.
fn deployments_endpoint(admin_url: &str) -> String {
    format!("{}/{}", admin_url.trim_end_matches('/'), DEPLOYMENTS_PATH)
}

/// Extract the host component of the admin URL.
fn admin_host(admin_url: &Url) -> DeployResult<String> {
    admin_url
        .host_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| DeployError::InvalidAdminUrl {
            url: admin_url.to_string(),
            source: url::ParseError::EmptyHost,
        })
}

/// Extract servlet routes from a deployment status payload.
///
/// The payload is traversed leniently: a missing `item` object, a
/// missing `servlets` array, or entries without both `servletName`
/// and `contextPath` string fields are silently skipped rather than
/// treated as errors.
fn extract_routes(body: &Value) -> Vec<ServletRoute> {
    let mut routes = Vec::new();

    let servlets = body
        .get("item")
        .and_then(|item| item.get("servlets"))
        .and_then(Value::as_array);

    if let Some(servlets) = servlets {
        for servlet in servlets {
            let servlet_name = servlet.get("servletName").and_then(Value::as_str);
            let context_path = servlet.get("contextPath").and_then(Value::as_str);
            if let (Some(servlet_name), Some(context_path)) = (servlet_name, context_path) {
                routes.push(ServletRoute::new(servlet_name, context_path));
            }
        }
    }

    debug!(routes = routes.len(), "extracted servlet routes");
    routes
}
