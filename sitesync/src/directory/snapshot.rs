//! Point-in-time view of the remote directory.

use std::collections::HashMap;

use tracing::{info, warn};

use super::{DirectoryClient, DirectoryResult, RemoteNode};

/// Path-to-id view of the directory, fetched once per tier pass.
///
/// The snapshot is never refreshed while a tier is processed, so nodes
/// created earlier in the same pass are not visible to later records.
#[derive(Debug, Clone, Default)]
pub struct RemoteSnapshot {
    nodes: HashMap<String, String>,
}

impl RemoteSnapshot {
    /// Fetches up to `limit` nodes from the directory.
    pub fn fetch<C: DirectoryClient + ?Sized>(
        client: &C,
        limit: usize,
    ) -> DirectoryResult<Self> {
        let nodes = client.fetch_nodes(limit)?;
        let fetched = nodes.len();
        if fetched >= limit {
            warn!(
                limit,
                "Directory snapshot reached the record limit; existing nodes beyond it will be created again"
            );
        }

        let snapshot = Self::from_nodes(nodes);
        info!(fetched, paths = snapshot.len(), "Fetched directory snapshot");
        Ok(snapshot)
    }

    /// Builds a snapshot from already fetched nodes.
    ///
    /// When several nodes share a path, the first one listed is kept. Nodes
    /// without a path or an external id cannot be matched or addressed and
    /// are skipped.
    pub fn from_nodes<I: IntoIterator<Item = RemoteNode>>(nodes: I) -> Self {
        let mut map = HashMap::new();
        for node in nodes {
            if node.full_path.is_empty() || node.external_id.is_empty() {
                warn!(
                    full_path = %node.full_path,
                    external_id = %node.external_id,
                    "Ignoring directory node without a path or external id"
                );
                continue;
            }
            map.entry(node.full_path).or_insert(node.external_id);
        }
        Self { nodes: map }
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// External id of the node at `path`.
    pub fn external_id(&self, path: &str) -> Option<&str> {
        self.nodes.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
