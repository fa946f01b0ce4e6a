//! Directory client abstraction and its reqwest implementation.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::types::{NodeListResponse, NodePayload, RemoteNode};
use super::{DirectoryError, DirectoryResult};

/// Fields requested when listing nodes.
const NODE_FIELDS: &str = "fullPath,externalId";

/// Operations the sync core needs from the remote directory.
///
/// Every call is blocking. This abstraction allows mock directories in tests.
pub trait DirectoryClient: Send + Sync {
    /// Lists up to `limit` nodes, requesting only their path and id.
    fn fetch_nodes(&self, limit: usize) -> DirectoryResult<Vec<RemoteNode>>;

    /// Creates a new node.
    fn create(&self, payload: &NodePayload) -> DirectoryResult<()>;

    /// Replaces the fields of an existing node.
    fn update(&self, external_id: &str, payload: &NodePayload) -> DirectoryResult<()>;
}

impl<T: DirectoryClient + ?Sized> DirectoryClient for &T {
    fn fetch_nodes(&self, limit: usize) -> DirectoryResult<Vec<RemoteNode>> {
        (**self).fetch_nodes(limit)
    }

    fn create(&self, payload: &NodePayload) -> DirectoryResult<()> {
        (**self).create(payload)
    }

    fn update(&self, external_id: &str, payload: &NodePayload) -> DirectoryResult<()> {
        (**self).update(external_id, payload)
    }
}

/// Connection settings for [`ReqwestDirectoryClient`].
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    /// Collection endpoint, e.g. `https://dir.example.com/api/locations`.
    pub base_url: String,
    /// Basic auth user; sent even when empty.
    pub username: String,
    /// Basic auth password; sent even when empty.
    pub password: String,
}

impl DirectoryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the basic auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}

/// REST directory client using blocking reqwest with basic auth.
pub struct ReqwestDirectoryClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ReqwestDirectoryClient {
    /// Creates a client for the given endpoint.
    pub fn new(config: DirectoryConfig) -> DirectoryResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| DirectoryError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
        })
    }

    fn list_url(&self, limit: usize) -> String {
        format!("{}?fields={}&limit={}", self.base_url, NODE_FIELDS, limit)
    }

    fn node_url(&self, external_id: &str) -> String {
        format!("{}/{}", self.base_url, external_id)
    }

    /// Sends the request and checks for the expected status.
    fn send(
        &self,
        method: &str,
        url: &str,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> DirectoryResult<Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .map_err(|e| DirectoryError::Transport {
                method: method.to_string(),
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        debug!(method, url, status = status.as_u16(), "Directory response");
        if status != expected {
            let body = response.text().unwrap_or_default();
            return Err(DirectoryError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                message: remote_message(&body),
            });
        }

        Ok(response)
    }
}

impl DirectoryClient for ReqwestDirectoryClient {
    fn fetch_nodes(&self, limit: usize) -> DirectoryResult<Vec<RemoteNode>> {
        let url = self.list_url(limit);
        let response = self.send("GET", &url, self.client.get(&url), StatusCode::OK)?;

        let body = response.text().map_err(|e| DirectoryError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let listing: NodeListResponse =
            serde_json::from_str(&body).map_err(|e| DirectoryError::Decode {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        Ok(listing.result)
    }

    fn create(&self, payload: &NodePayload) -> DirectoryResult<()> {
        let url = self.base_url.clone();
        self.send(
            "POST",
            &url,
            self.client.post(&url).json(payload),
            StatusCode::CREATED,
        )?;
        Ok(())
    }

    fn update(&self, external_id: &str, payload: &NodePayload) -> DirectoryResult<()> {
        let url = self.node_url(external_id);
        self.send(
            "PATCH",
            &url,
            self.client.patch(&url).json(payload),
            StatusCode::OK,
        )?;
        Ok(())
    }
}

/// Extracts the service's error message from a response body.
///
/// Understands `{"error": {"message": ..}}`, `{"error": {"detail": ..}}`,
/// `{"error": ".."}` and `{"message": ..}`.
pub(crate) fn remote_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error");

    let message = error
        .and_then(|e| e.get("message").or_else(|| e.get("detail")))
        .or_else(|| error.filter(|e| e.is_string()))
        .or_else(|| value.get("message"))?;

    message
        .as_str()
        .map(str::to_string)
        .filter(|m| !m.is_empty())
}
