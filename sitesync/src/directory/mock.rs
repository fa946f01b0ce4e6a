//! Scripted in-memory directory for tests.

use std::sync::Mutex;

use super::{DirectoryClient, DirectoryError, DirectoryResult, NodePayload, RemoteNode};

/// Kind of directory call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryOperation {
    Fetch,
    Create,
    Update,
}

/// A call recorded by [`MockDirectoryClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryCall {
    Fetch {
        limit: usize,
    },
    Create(NodePayload),
    Update {
        external_id: String,
        payload: NodePayload,
    },
}

/// Directory client returning a fixed node listing and recording every call.
#[derive(Debug, Default)]
pub struct MockDirectoryClient {
    nodes: Vec<RemoteNode>,
    failure: Option<(DirectoryOperation, u16)>,
    calls: Mutex<Vec<DirectoryCall>>,
}

impl MockDirectoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the listing returned by every fetch.
    pub fn with_node(mut self, full_path: impl Into<String>, external_id: impl Into<String>) -> Self {
        self.nodes.push(RemoteNode::new(full_path, external_id));
        self
    }

    pub fn with_nodes<I: IntoIterator<Item = RemoteNode>>(mut self, nodes: I) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Makes every call of `operation` fail with `status`.
    pub fn failing_on(mut self, operation: DirectoryOperation, status: u16) -> Self {
        self.failure = Some((operation, status));
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.lock().clone()
    }

    pub fn fetch_limits(&self) -> Vec<usize> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                DirectoryCall::Fetch { limit } => Some(*limit),
                _ => None,
            })
            .collect()
    }

    pub fn created(&self) -> Vec<NodePayload> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                DirectoryCall::Create(payload) => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    /// Updates as `(external_id, payload)` pairs.
    pub fn updated(&self) -> Vec<(String, NodePayload)> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                DirectoryCall::Update {
                    external_id,
                    payload,
                } => Some((external_id.clone(), payload.clone())),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DirectoryCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, operation: DirectoryOperation, call: DirectoryCall) -> DirectoryResult<()> {
        self.lock().push(call);
        match self.failure {
            Some((failing, status)) if failing == operation => Err(DirectoryError::Status {
                method: match operation {
                    DirectoryOperation::Fetch => "GET",
                    DirectoryOperation::Create => "POST",
                    DirectoryOperation::Update => "PATCH",
                }
                .to_string(),
                url: "mock://directory".to_string(),
                status,
                message: Some("scripted failure".to_string()),
            }),
            _ => Ok(()),
        }
    }
}

impl DirectoryClient for MockDirectoryClient {
    fn fetch_nodes(&self, limit: usize) -> DirectoryResult<Vec<RemoteNode>> {
        self.record(DirectoryOperation::Fetch, DirectoryCall::Fetch { limit })?;
        Ok(self.nodes.iter().take(limit).cloned().collect())
    }

    fn create(&self, payload: &NodePayload) -> DirectoryResult<()> {
        self.record(
            DirectoryOperation::Create,
            DirectoryCall::Create(payload.clone()),
        )
    }

    fn update(&self, external_id: &str, payload: &NodePayload) -> DirectoryResult<()> {
        self.record(
            DirectoryOperation::Update,
            DirectoryCall::Update {
                external_id: external_id.to_string(),
                payload: payload.clone(),
            },
        )
    }
}
