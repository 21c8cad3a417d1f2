//! Common test utilities: a fake management REST API.
//!
//! Spins up an axum server on an ephemeral port that mimics the
//! application-server deployment endpoints, records every request it
//! receives, and answers with scriptable statuses and bodies.

use std::sync::{Arc, Mutex, OnceLock};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{any, post};
use axum::Router;

/// One recorded multipart part from a deployment POST.
#[derive(Debug, Clone)]
pub struct RecordedPart {
    pub name: String,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// One recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub deployment_name: Option<String>,
    pub authorization: Option<String>,
    pub requested_by: Option<String>,
    pub parts: Vec<RecordedPart>,
}

/// Scriptable server behaviour.
#[derive(Debug, Clone)]
pub struct Behaviour {
    pub post_status: StatusCode,
    pub post_body: String,
    pub include_location: bool,
    pub get_status: StatusCode,
    pub get_body: String,
    pub delete_status: StatusCode,
    pub delete_body: String,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            post_status: StatusCode::CREATED,
            post_body: String::new(),
            include_location: true,
            get_status: StatusCode::OK,
            get_body: r#"{"item":{"servlets":[{"servletName":"Test","contextPath":"/test"}]}}"#
                .to_owned(),
            delete_status: StatusCode::OK,
            delete_body: "{}".to_owned(),
        }
    }
}

struct ServerState {
    behaviour: Behaviour,
    base_url: OnceLock<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running fake management API bound to an ephemeral local port.
pub struct TestAdminServer {
    state: Arc<ServerState>,
    base_url: String,
    port: u16,
    handle: tokio::task::JoinHandle<()>,
}

impl TestAdminServer {
    /// Start a server with default behaviour (successful deploy and
    /// undeploy).
    pub async fn spawn() -> Self {
        Self::with_behaviour(Behaviour::default()).await
    }

    /// Start a server with custom behaviour.
    pub async fn with_behaviour(behaviour: Behaviour) -> Self {
        let state = Arc::new(ServerState {
            behaviour,
            base_url: OnceLock::new(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(
                "/management/wls/latest/deployments/application",
                post(post_deployment),
            )
            .route(
                "/management/wls/latest/deployments/application/id/{name}",
                any(deployment_resource),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("test server address");
        let base_url = format!("http://{addr}");
        state
            .base_url
            .set(base_url.clone())
            .expect("base_url set once");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test server");
        });

        Self {
            state,
            base_url,
            port: addr.port(),
            handle,
        }
    }

    /// Base URL to use as the admin URL under test.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    /// Requests received so far with the given method.
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

impl Drop for TestAdminServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

async fn post_deployment(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut parts = Vec::new();
    let mut deployment_name = None;

    while let Some(field) = multipart.next_field().await.expect("read multipart field") {
        let name = field.name().unwrap_or_default().to_owned();
        let content_type = field.content_type().map(ToOwned::to_owned);
        let file_name = field.file_name().map(ToOwned::to_owned);
        let bytes = field.bytes().await.expect("read field bytes").to_vec();

        if name == "model" {
            if let Ok(model) = serde_json::from_slice::<serde_json::Value>(&bytes) {
                deployment_name = model
                    .get("name")
                    .and_then(serde_json::Value::as_str)
                    .map(ToOwned::to_owned);
            }
        }

        parts.push(RecordedPart {
            name,
            content_type,
            file_name,
            bytes,
        });
    }

    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method: "POST".to_owned(),
        deployment_name: deployment_name.clone(),
        authorization: header_value(&headers, "authorization"),
        requested_by: header_value(&headers, "x-requested-by"),
        parts,
    });

    let behaviour = &state.behaviour;
    let mut response = Response::builder().status(behaviour.post_status);

    if behaviour.post_status == StatusCode::CREATED && behaviour.include_location {
        let base = state.base_url.get().expect("base_url initialised");
        let name = deployment_name.as_deref().unwrap_or("unknown");
        response = response.header(
            header::LOCATION,
            format!("{base}/management/wls/latest/deployments/application/id/{name}"),
        );
    }

    response
        .body(behaviour.post_body.clone().into())
        .expect("build POST response")
}

async fn deployment_resource(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    method: axum::http::Method,
    headers: HeaderMap,
) -> Response {
    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method: method.to_string(),
        deployment_name: Some(name),
        authorization: header_value(&headers, "authorization"),
        requested_by: header_value(&headers, "x-requested-by"),
        parts: Vec::new(),
    });

    let behaviour = &state.behaviour;
    let (status, body) = match method.as_str() {
        "DELETE" => (behaviour.delete_status, behaviour.delete_body.clone()),
        _ => (behaviour.get_status, behaviour.get_body.clone()),
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("build resource response")
}
